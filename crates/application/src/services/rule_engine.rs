use crate::ports::{Action, Continuation, Matcher};
use crate::DiagnosticSink;
use async_trait::async_trait;
use rule_switcher_domain::{DomainError, QueryContext};
use std::sync::Arc;
use tracing::debug;

/// A compiled rule at a fixed position in its engine.
pub struct Rule {
    index: usize,
    matcher: Arc<dyn Matcher>,
    action: Arc<dyn Action>,
}

impl Rule {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered first-match dispatcher.
///
/// The rule list is fixed at construction. An engine is `Send + Sync` and
/// meant to be shared behind an `Arc` by every in-flight query.
pub struct RuleEngine {
    rules: Vec<Rule>,
    sink: DiagnosticSink,
}

impl RuleEngine {
    /// Build an engine from `(matcher, action)` pairs in priority order.
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (Arc<dyn Matcher>, Arc<dyn Action>)>,
    {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, (matcher, action))| Rule {
                index,
                matcher,
                action,
            })
            .collect();

        Self {
            rules,
            sink: DiagnosticSink::default(),
        }
    }

    pub fn with_sink(mut self, sink: DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Route the request to the first rule whose matcher accepts it.
    ///
    /// A matched rule's action receives `next` and owns the decision to call
    /// it; the engine never calls `next` itself in that case. When no rule
    /// matches, `next` runs exactly once. A matcher error stops evaluation and
    /// comes back tagged with the rule index; action and continuation results
    /// are returned untouched.
    pub async fn evaluate(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        for rule in &self.rules {
            let matched = rule
                .matcher
                .matches(ctx)
                .await
                .map_err(|e| DomainError::rule_match(rule.index, e))?;

            if matched {
                self.sink.emit(|| {
                    debug!(rule = rule.index, qname = %ctx.qname(), id = ctx.id(), "Rule matched")
                });
                return rule.action.execute(ctx, next).await;
            }
        }

        self.sink.emit(|| {
            debug!(rules = self.rules.len(), qname = %ctx.qname(), id = ctx.id(), "No rule matched")
        });
        next.proceed(ctx).await
    }
}

#[async_trait]
impl Action for RuleEngine {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        self.evaluate(ctx, next).await
    }
}
