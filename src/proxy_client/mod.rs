//! Building and sending HTTP requests routed through a proxy.
//!
//! The probe executor only talks to the [`ProxyClient`] trait, so the
//! orchestration logic can be driven by a scripted client in tests while
//! production uses [`ReqwestProxyClient`].

pub mod reqwest_client;

use std::future::Future;

pub use reqwest_client::{PreparedRequest, ReqwestProxyClient};

/// How to authenticate against the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    Basic { username: String, password: String },
}

/// Everything needed to build one proxied request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub target: String,
    pub proxy: String,
    pub auth: AuthMethod,
    /// Skip TLS certificate verification of the target.
    pub insecure: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyClientError {
    #[error("invalid target url {target:?}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid proxy address {proxy:?}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not configure http client")]
    Client(#[source] reqwest::Error),

    #[error("request failed")]
    Send(#[source] reqwest::Error),
}

/// A client able to prepare a request bound to a proxy, then send it.
pub trait ProxyClient: Send + Sync + 'static {
    /// A ready-to-send request, together with whatever client it is bound to.
    type Request: Send + 'static;

    /// Prepare a request for `config.target` routed through `config.proxy`.
    fn build(&self, config: &RequestConfig) -> Result<Self::Request, ProxyClientError>;

    /// Perform the exchange and return the response status code.
    ///
    /// Dropping the returned future must abort the underlying I/O.
    fn send(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Result<u16, ProxyClientError>> + Send;
}
