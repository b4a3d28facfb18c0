mod action;
mod matcher;
mod rule_sources;

pub use action::{Action, Continuation, EndOfChain};
pub use matcher::Matcher;
pub use rule_sources::{ActionParser, DomainMatcherBuilder, IpMatcherBuilder};

// Re-export for convenience
pub use rule_switcher_domain::{DomainError, QueryContext};
