mod actions;
mod errors;
mod logging;
mod root;

pub use actions::ActionConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
