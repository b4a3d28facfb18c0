use super::builtin::{BlockAction, LogAction, RespondAction};
use super::sequence::Sequence;
use rule_switcher_application::ports::{Action, ActionParser};
use rule_switcher_application::DiagnosticSink;
use rule_switcher_domain::{ActionConfig, DomainError, ExecConfig};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named actions a rule's `exec` can refer to.
///
/// `exec` is either one tag or a list of tags run as a [`Sequence`]. Tags
/// resolve first against actions registered in code, then against
/// `[actions.<tag>]` entries from the configuration.
#[derive(Default)]
pub struct ActionRegistry {
    configured: BTreeMap<String, ActionConfig>,
    registered: FxHashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(actions: &BTreeMap<String, ActionConfig>) -> Self {
        Self {
            configured: actions.clone(),
            registered: FxHashMap::default(),
        }
    }

    /// Make an already built action available under `tag`.
    pub fn with_action(mut self, tag: impl Into<String>, action: Arc<dyn Action>) -> Self {
        self.registered.insert(tag.into(), action);
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.registered.contains_key(tag) || self.configured.contains_key(tag)
    }

    pub fn resolve(&self, tag: &str, sink: &DiagnosticSink) -> Result<Arc<dyn Action>, DomainError> {
        if let Some(action) = self.registered.get(tag) {
            return Ok(Arc::clone(action));
        }

        let config = self
            .configured
            .get(tag)
            .ok_or_else(|| DomainError::UnknownAction(tag.to_string()))?;

        let action: Arc<dyn Action> = match config {
            ActionConfig::Block => Arc::new(BlockAction::new(sink.clone())),
            ActionConfig::Respond { addresses, ttl } => {
                Arc::new(RespondAction::new(addresses.clone(), *ttl))
            }
            ActionConfig::Log { message } => {
                Arc::new(LogAction::new(tag, message.clone(), sink.clone()))
            }
        };
        Ok(action)
    }
}

impl ActionParser for ActionRegistry {
    fn parse(
        &self,
        exec: &ExecConfig,
        sink: &DiagnosticSink,
    ) -> Result<Arc<dyn Action>, DomainError> {
        let mut steps = exec_tags(exec)?
            .into_iter()
            .map(|tag| self.resolve(tag, sink))
            .collect::<Result<Vec<_>, _>>()?;

        if steps.len() == 1 {
            return Ok(steps.remove(0));
        }
        Ok(Arc::new(Sequence::new(steps)))
    }
}

fn exec_tags(exec: &ExecConfig) -> Result<Vec<&str>, DomainError> {
    let tags = match exec {
        toml::Value::String(tag) => vec![tag.as_str()],
        toml::Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    DomainError::InvalidExecSequence(format!(
                        "sequence entries must be tags, got {}",
                        item.type_str()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(DomainError::InvalidExecSequence(format!(
                "expected a tag or a list of tags, got {}",
                other.type_str()
            )))
        }
    };

    if tags.is_empty() {
        return Err(DomainError::InvalidExecSequence(
            "sequence is empty".to_string(),
        ));
    }
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return Err(DomainError::InvalidExecSequence(
            "empty action tag".to_string(),
        ));
    }

    Ok(tags)
}
