//! Rule Switcher Application Layer
//!
//! Owns the rule-dispatch core: the ports matchers and actions implement,
//! the compiler that turns `[[rules]]` entries into an engine, and the
//! engine itself.
pub mod diagnostics;
pub mod ports;
pub mod services;

pub use diagnostics::DiagnosticSink;
