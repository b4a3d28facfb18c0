use async_trait::async_trait;
use rule_switcher_domain::{DomainError, QueryContext};

/// What the owning pipeline wants done when the current step hands over.
#[async_trait]
pub trait Continuation: Send + Sync {
    async fn proceed(&self, ctx: &mut QueryContext) -> Result<(), DomainError>;
}

#[async_trait]
pub trait Action: Send + Sync {
    /// Handle the request. The action alone decides whether `next` runs.
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError>;
}

/// Continuation for the last step of a pipeline: nothing left to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndOfChain;

#[async_trait]
impl Continuation for EndOfChain {
    async fn proceed(&self, _ctx: &mut QueryContext) -> Result<(), DomainError> {
        Ok(())
    }
}
