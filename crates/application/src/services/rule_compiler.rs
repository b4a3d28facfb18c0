use super::matchers::{DefaultMatcher, NegatedMatcher};
use super::rule_engine::RuleEngine;
use crate::ports::{Action, ActionParser, DomainMatcherBuilder, IpMatcherBuilder, Matcher};
use crate::DiagnosticSink;
use rule_switcher_domain::{DomainError, RuleKind, RuleSpec};
use std::sync::Arc;
use tracing::{debug, info};

/// Compiles `[[rules]]` entries into a [`RuleEngine`].
///
/// Pattern parsing and exec parsing are delegated to the injected builders;
/// the compiler only dispatches on the rule type and applies negation.
pub struct RuleCompiler {
    domains: Arc<dyn DomainMatcherBuilder>,
    ips: Arc<dyn IpMatcherBuilder>,
    actions: Arc<dyn ActionParser>,
    sink: DiagnosticSink,
}

impl RuleCompiler {
    pub fn new(
        domains: Arc<dyn DomainMatcherBuilder>,
        ips: Arc<dyn IpMatcherBuilder>,
        actions: Arc<dyn ActionParser>,
    ) -> Self {
        Self {
            domains,
            ips,
            actions,
            sink: DiagnosticSink::default(),
        }
    }

    /// Sink handed to every compiled engine and to the action parser.
    pub fn with_sink(mut self, sink: DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Compile every spec in order.
    ///
    /// The first failing spec aborts compilation with its index attached; no
    /// engine is produced in that case.
    pub fn compile(&self, specs: &[RuleSpec]) -> Result<RuleEngine, DomainError> {
        let mut rules = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            let rule = self
                .compile_rule(index, spec)
                .map_err(|e| DomainError::rule_compile(index, e))?;
            rules.push(rule);
        }

        self.sink.emit(|| info!(rules = rules.len(), "Rules compiled"));

        Ok(RuleEngine::new(rules).with_sink(self.sink.clone()))
    }

    fn compile_rule(
        &self,
        index: usize,
        spec: &RuleSpec,
    ) -> Result<(Arc<dyn Matcher>, Arc<dyn Action>), DomainError> {
        let (negated, bare_type) = spec.split_negation();

        let kind = RuleKind::parse(bare_type)
            .ok_or_else(|| DomainError::UnsupportedRuleType(bare_type.to_string()))?;

        let mut matcher: Arc<dyn Matcher> = match kind {
            RuleKind::Default => Arc::new(DefaultMatcher),
            RuleKind::QName => self.domains.build(&spec.args)?,
            RuleKind::Ip => self.ips.build(&spec.args)?,
        };

        if negated {
            matcher = Arc::new(NegatedMatcher::new(matcher));
        }

        let action = self.actions.parse(&spec.exec, &self.sink)?;

        self.sink.emit(|| {
            debug!(rule = index, kind = kind.as_str(), negated, "Rule compiled")
        });

        Ok((matcher, action))
    }
}
