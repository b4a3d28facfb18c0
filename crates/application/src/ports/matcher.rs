use async_trait::async_trait;
use rule_switcher_domain::{DomainError, QueryContext};

#[async_trait]
pub trait Matcher: Send + Sync {
    /// Decide whether a rule applies to this request.
    ///
    /// An `Err` carries no verdict; callers must not treat it as `false`.
    async fn matches(&self, ctx: &QueryContext) -> Result<bool, DomainError>;
}
