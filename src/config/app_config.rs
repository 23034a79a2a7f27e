use std::env;
use std::path::{Path, PathBuf};

use super::ConfigError;
use super::probe_config::{Config, parse_config};

/// File names searched for, in order, inside the configuration directory.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["config.yml", "config.yaml"];

const USERNAME_ENV: &str = "PROXY_USERNAME";
const PASSWORD_ENV: &str = "PROXY_PASSWORD";

/// Load the exporter configuration from a directory and the environment.
/// This function looks for `config.yml` (then `config.yaml`) inside `dir`,
/// parses it into a `Config` struct, and overrides the proxy credentials with
/// the `PROXY_USERNAME` and `PROXY_PASSWORD` environment variables when set.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = find_config_file(dir)?;
    let config_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let config = parse_config(&config_str)?;
    tracing::info!(path = %path.display(), "loaded configuration");

    Ok(apply_env_overrides(config, |key| env::var(key).ok()))
}

fn find_config_file(dir: &Path) -> Result<PathBuf, ConfigError> {
    let candidates: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).collect();
    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or(ConfigError::NotFound { tried: candidates })
}

fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(username) = lookup(USERNAME_ENV) {
        config.username = username;
    }
    if let Some(password) = lookup(PASSWORD_ENV) {
        config.password = password;
    }
    config
}
