use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::actions::ActionConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use crate::rule_spec::RuleSpec;

const LOCAL_CONFIG_PATH: &str = "rule-switcher.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/rule-switcher/config.toml";

/// Main configuration structure for the rule switcher
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Named actions that rule `exec` entries refer to by tag
    #[serde(default)]
    pub actions: BTreeMap<String, ActionConfig>,

    /// Ordered rules; the first matching entry wins
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rule-switcher.toml in current directory
    /// 3. /etc/rule-switcher/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Only shape is checked here. Rule types, patterns and exec tags are
    /// checked when the rules are compiled, where the error carries the
    /// rule's position.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            let (_, bare) = rule.split_negation();
            if bare.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Rule #{} has an empty type",
                    index
                )));
            }
        }

        if let Some(tag) = self.actions.keys().find(|tag| tag.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Action tag '{}' is empty",
                tag
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
}
