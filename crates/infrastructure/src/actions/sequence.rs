use async_trait::async_trait;
use rule_switcher_application::ports::{Action, Continuation};
use rule_switcher_domain::{DomainError, QueryContext};
use std::sync::Arc;

/// Runs actions one after another.
///
/// Each step receives a continuation that runs the remaining steps and then
/// the outer continuation, so any step may stop the chain by not calling it.
pub struct Sequence {
    steps: Vec<Arc<dyn Action>>,
}

impl Sequence {
    pub fn new(steps: Vec<Arc<dyn Action>>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[async_trait]
impl Action for Sequence {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        run_steps(&self.steps, ctx, next).await
    }
}

struct Remaining<'a> {
    steps: &'a [Arc<dyn Action>],
    outer: &'a dyn Continuation,
}

#[async_trait]
impl<'a> Continuation for Remaining<'a> {
    async fn proceed(&self, ctx: &mut QueryContext) -> Result<(), DomainError> {
        run_steps(self.steps, ctx, self.outer).await
    }
}

async fn run_steps(
    steps: &[Arc<dyn Action>],
    ctx: &mut QueryContext,
    outer: &dyn Continuation,
) -> Result<(), DomainError> {
    let Some((first, rest)) = steps.split_first() else {
        return outer.proceed(ctx).await;
    };

    if ctx.is_cancelled() {
        return Err(DomainError::Cancelled);
    }

    let remaining = Remaining { steps: rest, outer };
    first.execute(ctx, &remaining).await
}
