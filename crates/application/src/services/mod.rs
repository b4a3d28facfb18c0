mod matchers;
mod rule_compiler;
mod rule_engine;
mod switcher_handle;

pub use matchers::{DefaultMatcher, NegatedMatcher};
pub use rule_compiler::RuleCompiler;
pub use rule_engine::{Rule, RuleEngine};
pub use switcher_handle::SwitcherHandle;
