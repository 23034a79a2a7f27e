use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Semaphore;

use super::ConfigError;

/// The exporter configuration.
/// Contains the proxy credentials, the TLS policy and the probe matrix.
/// Shared read-only by every probe once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Username used for basic authentication against every proxy.
    pub username: String,

    /// Password used for basic authentication against every proxy.
    pub password: String,

    /// Skip TLS certificate verification of the targets.
    pub insecure: bool,

    /// Overall budget shared by all probes. `None` means no deadline.
    pub timeout: Option<Duration>,

    /// Proxy addresses, either `host:port` or a full URL.
    pub proxies: Vec<String>,

    /// Target URLs requested through each proxy.
    pub targets: Vec<String>,

    /// Maximum number of probes in flight. `None` runs the whole matrix at once.
    pub concurrency: Option<usize>,
}

impl Config {
    /// Number of probes the matrix expands to.
    pub fn task_count(&self) -> usize {
        self.targets.len() * self.proxies.len()
    }

    /// The deadline budget, if a positive timeout was configured.
    pub fn deadline_budget(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    insecure: bool,
    #[serde(default)]
    timeout: Option<RawTimeout>,
    #[serde(default)]
    proxies: Vec<String>,
    #[serde(default)]
    targets: Vec<String>,
    #[serde(default)]
    concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimeout {
    Seconds(u64),
    Text(String),
}

/// Parse a YAML document into a [`Config`].
pub fn parse_config(yaml: &str) -> Result<Config, ConfigError> {
    let raw: RawConfig = serde_yaml::from_str(yaml)?;

    let timeout = match raw.timeout {
        None => None,
        Some(RawTimeout::Seconds(secs)) => Some(Duration::from_secs(secs)),
        Some(RawTimeout::Text(text)) => Some(parse_duration(&text)?),
    };

    // A zero limit would never admit a probe.
    let concurrency = match raw.concurrency.filter(|n| *n > 0) {
        Some(n) if n > Semaphore::MAX_PERMITS => return Err(ConfigError::ConcurrencyTooLarge(n)),
        other => other,
    };

    Ok(Config {
        username: raw.username,
        password: raw.password,
        insecure: raw.insecure,
        timeout,
        proxies: raw.proxies,
        targets: raw.targets,
        concurrency,
    })
}

/// Parse a duration string like "10s", "500ms", "1m 30s" or "2h".
/// A bare number is read as seconds.
fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    let trimmed = text.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(trimmed).map_err(|_| ConfigError::InvalidDuration(text.to_string()))
}
