use rule_switcher_application::services::{RuleCompiler, SwitcherHandle};
use rule_switcher_application::DiagnosticSink;
use rule_switcher_domain::Config;
use rule_switcher_infrastructure::actions::ActionRegistry;
use rule_switcher_infrastructure::matchers::{DomainSetBuilder, IpListBuilder};
use std::sync::Arc;

/// Wire the rule compiler to the file-backed collaborators and compile
/// the configured rules.
pub fn build_switcher(config: &Config) -> anyhow::Result<SwitcherHandle> {
    let registry = ActionRegistry::from_config(&config.actions);

    let compiler = RuleCompiler::new(
        Arc::new(DomainSetBuilder),
        Arc::new(IpListBuilder),
        Arc::new(registry),
    )
    .with_sink(DiagnosticSink::current());

    Ok(SwitcherHandle::new(compiler, &config.rules)?)
}
