use super::rule_compiler::RuleCompiler;
use super::rule_engine::RuleEngine;
use crate::ports::{Action, Continuation};
use arc_swap::ArcSwap;
use async_trait::async_trait;
use rule_switcher_domain::{DomainError, QueryContext, RuleSpec};
use std::sync::Arc;
use tracing::{info, warn};

/// Publishes the current engine to concurrent queries and swaps in new ones.
///
/// A reload compiles a complete new engine first. Queries already running
/// finish on the engine they started with.
pub struct SwitcherHandle {
    engine: ArcSwap<RuleEngine>,
    compiler: RuleCompiler,
}

impl SwitcherHandle {
    pub fn new(compiler: RuleCompiler, specs: &[RuleSpec]) -> Result<Self, DomainError> {
        let engine = compiler.compile(specs)?;
        Ok(Self {
            engine: ArcSwap::from_pointee(engine),
            compiler,
        })
    }

    /// Compile `specs` and publish the result. On error the previous engine
    /// stays in place.
    pub fn reload(&self, specs: &[RuleSpec]) -> Result<(), DomainError> {
        let engine = match self.compiler.compile(specs) {
            Ok(engine) => engine,
            Err(e) => {
                self.compiler
                    .sink()
                    .emit(|| warn!(error = %e, "Rule reload rejected; keeping current rules"));
                return Err(e);
            }
        };

        let rules = engine.len();
        self.engine.store(Arc::new(engine));
        self.compiler
            .sink()
            .emit(|| info!(rules, "Rules reloaded"));
        Ok(())
    }

    /// Snapshot of the engine serving new queries.
    pub fn current(&self) -> Arc<RuleEngine> {
        self.engine.load_full()
    }

    pub async fn evaluate(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        let engine = self.engine.load_full();
        engine.evaluate(ctx, next).await
    }
}

#[async_trait]
impl Action for SwitcherHandle {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        self.evaluate(ctx, next).await
    }
}
