mod builtin;
mod registry;
mod sequence;

pub use builtin::{BlockAction, LogAction, RespondAction};
pub use registry::ActionRegistry;
pub use sequence::Sequence;
