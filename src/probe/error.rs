use std::fmt::Write;

use tokio::task::JoinError;

use crate::proxy_client::ProxyClientError;

/// Why a single probe failed. Every variant names the target and proxy.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("could not prepare request to {target} via {proxy}")]
    RequestBuild {
        target: String,
        proxy: String,
        #[source]
        source: ProxyClientError,
    },

    #[error("could not send request to {target} via {proxy}")]
    Transport {
        target: String,
        proxy: String,
        #[source]
        source: TransportError,
    },

    #[error("got {status} (200 expected) to {target} via {proxy}")]
    UnexpectedStatus {
        target: String,
        proxy: String,
        status: u16,
    },

    #[error("probe of {target} via {proxy} did not complete")]
    Aborted {
        target: String,
        proxy: String,
        #[source]
        source: JoinError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("shared deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Client(#[from] ProxyClientError),
}

impl ProbeError {
    /// Short label for the failure class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::RequestBuild { .. } => "request-build-error",
            ProbeError::Transport { .. } => "transport-error",
            ProbeError::UnexpectedStatus { .. } => "unexpected-status-error",
            ProbeError::Aborted { .. } => "aborted",
        }
    }

    pub fn target(&self) -> &str {
        match self {
            ProbeError::RequestBuild { target, .. }
            | ProbeError::Transport { target, .. }
            | ProbeError::UnexpectedStatus { target, .. }
            | ProbeError::Aborted { target, .. } => target,
        }
    }

    pub fn proxy(&self) -> &str {
        match self {
            ProbeError::RequestBuild { proxy, .. }
            | ProbeError::Transport { proxy, .. }
            | ProbeError::UnexpectedStatus { proxy, .. }
            | ProbeError::Aborted { proxy, .. } => proxy,
        }
    }
}

/// Render an error followed by its whole `source()` chain on one line.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
