use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Unsupported rule type [{0}]")]
    UnsupportedRuleType(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidDomainPattern(String),

    #[error("Invalid IP range: {0}")]
    InvalidIpRange(String),

    #[error("Invalid exec sequence: {0}")]
    InvalidExecSequence(String),

    #[error("Unknown action tag: {0}")]
    UnknownAction(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Failed to parse rule #{index}: {source}")]
    RuleCompile {
        index: usize,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Rule #{index} matcher error: {source}")]
    RuleMatch {
        index: usize,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    pub fn rule_compile(index: usize, source: DomainError) -> Self {
        Self::RuleCompile {
            index,
            source: Box::new(source),
        }
    }

    pub fn rule_match(index: usize, source: DomainError) -> Self {
        Self::RuleMatch {
            index,
            source: Box::new(source),
        }
    }

    /// Position of the rule that produced this error, if it was tagged with one.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Self::RuleCompile { index, .. } | Self::RuleMatch { index, .. } => Some(*index),
            _ => None,
        }
    }
}
