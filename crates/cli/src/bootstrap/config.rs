use rule_switcher_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;
    config.validate()?;

    if let Some(path) = path.map(str::to_string).or_else(Config::get_config_path) {
        info!(path = %path, rules = config.rules.len(), "Configuration loaded");
    } else {
        info!("No configuration file found, using defaults");
    }

    Ok(config)
}
