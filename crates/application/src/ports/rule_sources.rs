use super::{Action, Matcher};
use crate::DiagnosticSink;
use rule_switcher_domain::{DomainError, ExecConfig};
use std::sync::Arc;

/// Builds a matcher over the query name from a rule's `args` text.
pub trait DomainMatcherBuilder: Send + Sync {
    fn build(&self, args: &str) -> Result<Arc<dyn Matcher>, DomainError>;
}

/// Builds a matcher over response addresses from a rule's `args` text.
pub trait IpMatcherBuilder: Send + Sync {
    fn build(&self, args: &str) -> Result<Arc<dyn Matcher>, DomainError>;
}

/// Turns a rule's opaque `exec` payload into an action.
pub trait ActionParser: Send + Sync {
    fn parse(&self, exec: &ExecConfig, sink: &DiagnosticSink)
        -> Result<Arc<dyn Action>, DomainError>;
}
