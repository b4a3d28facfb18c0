//! Conversion between DNS wire messages and [`QueryContext`].
//!
//! [`QueryContext`]: rule_switcher_domain::QueryContext

mod record_type_map;
mod reply;
mod request;
mod wire;

pub use record_type_map::RecordTypeMapper;
pub use reply::{build_reply, response_from_upstream};
pub use request::{build_query, context_from_request};
pub use wire::{decode, encode};
