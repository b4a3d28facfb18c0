//! Rule Switcher Infrastructure Layer
//!
//! Concrete matchers, the action registry that parses rule `exec` entries,
//! and the adapter between DNS wire messages and query contexts.
pub mod actions;
pub mod matchers;
pub mod message;
