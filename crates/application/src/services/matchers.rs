use crate::ports::Matcher;
use async_trait::async_trait;
use rule_switcher_domain::{DomainError, QueryContext};
use std::sync::Arc;

/// Matches every request. Anything placed after it is unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

#[async_trait]
impl Matcher for DefaultMatcher {
    async fn matches(&self, _ctx: &QueryContext) -> Result<bool, DomainError> {
        Ok(true)
    }
}

/// Inverts a successful verdict of the wrapped matcher.
///
/// An error from the inner matcher is returned as is.
pub struct NegatedMatcher {
    inner: Arc<dyn Matcher>,
}

impl NegatedMatcher {
    pub fn new(inner: Arc<dyn Matcher>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Matcher for NegatedMatcher {
    async fn matches(&self, ctx: &QueryContext) -> Result<bool, DomainError> {
        let matched = self.inner.matches(ctx).await?;
        Ok(!matched)
    }
}
