use serde::{Deserialize, Serialize};

/// Opaque `exec` payload of a rule. Only the action parser interprets it.
pub type ExecConfig = toml::Value;

pub const NEGATION_PREFIX: char = '!';

/// One uncompiled `[[rules]]` entry. Order in the containing list is priority.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RuleSpec {
    #[serde(rename = "type")]
    pub rule_type: String,

    #[serde(default)]
    pub args: String,

    pub exec: ExecConfig,
}

impl RuleSpec {
    pub fn new(
        rule_type: impl Into<String>,
        args: impl Into<String>,
        exec: impl Into<ExecConfig>,
    ) -> Self {
        Self {
            rule_type: rule_type.into(),
            args: args.into(),
            exec: exec.into(),
        }
    }

    /// Splits a leading `!` off the type.
    pub fn split_negation(&self) -> (bool, &str) {
        match self.rule_type.strip_prefix(NEGATION_PREFIX) {
            Some(bare) => (true, bare),
            None => (false, self.rule_type.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Default,
    QName,
    Ip,
}

impl RuleKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "qname" => Some(Self::QName),
            "ip" => Some(Self::Ip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::QName => "qname",
            Self::Ip => "ip",
        }
    }
}
