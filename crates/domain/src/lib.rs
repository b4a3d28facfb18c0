//! Rule Switcher Domain Layer
pub mod config;
pub mod errors;
pub mod query_context;
pub mod record_type;
pub mod rule_spec;

pub use config::{ActionConfig, CliOverrides, Config, ConfigError, LoggingConfig};
pub use errors::DomainError;
pub use query_context::{DnsQuery, DnsResponse, QueryContext, ResponseStatus};
pub use record_type::RecordType;
pub use rule_spec::{ExecConfig, RuleKind, RuleSpec};
