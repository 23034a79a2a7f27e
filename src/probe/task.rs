use std::fmt;

use crate::config::Config;

/// One cell of the probe matrix: a target requested through a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTask {
    pub target: String,
    pub proxy: String,
}

impl ProbeTask {
    pub fn new(target: impl Into<String>, proxy: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            proxy: proxy.into(),
        }
    }
}

impl fmt::Display for ProbeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} via {:?}", self.target, self.proxy)
    }
}

/// Expand targets × proxies, target-major, in configuration order.
pub fn expand_matrix(config: &Config) -> Vec<ProbeTask> {
    config
        .targets
        .iter()
        .flat_map(|target| {
            config
                .proxies
                .iter()
                .map(move |proxy| ProbeTask::new(target.as_str(), proxy.as_str()))
        })
        .collect()
}
