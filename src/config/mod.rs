pub mod app_config;
pub mod probe_config;

use std::path::PathBuf;

pub use app_config::load_config;
pub use probe_config::{Config, parse_config};

/// Errors raised while locating, reading or parsing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no configuration file found (tried {tried:?})")]
    NotFound { tried: Vec<PathBuf> },

    #[error("error reading configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error while converting configuration to struct")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid timeout duration {0:?}")]
    InvalidDuration(String),

    #[error("concurrency {0} exceeds the largest supported limit")]
    ConcurrencyTooLarge(usize),
}
