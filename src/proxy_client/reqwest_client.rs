use reqwest::{Client, Proxy};
use url::Url;

use super::{AuthMethod, ProxyClient, ProxyClientError, RequestConfig};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A reqwest client bound to a single proxy, plus the request to send with it.
#[derive(Debug)]
pub struct PreparedRequest {
    pub client: Client,
    pub request: reqwest::Request,
}

/// [`ProxyClient`] backed by reqwest. Every request gets its own client so
/// that probes never share a connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestProxyClient;

impl ReqwestProxyClient {
    pub fn new() -> Self {
        Self
    }
}

/// Bare `host:port` addresses are plain HTTP proxies.
fn proxy_url(proxy: &str) -> Result<Url, ProxyClientError> {
    let with_scheme = if proxy.contains("://") {
        proxy.to_string()
    } else {
        format!("http://{proxy}")
    };

    Url::parse(&with_scheme).map_err(|source| ProxyClientError::InvalidProxy {
        proxy: proxy.to_string(),
        source,
    })
}

impl ProxyClient for ReqwestProxyClient {
    type Request = PreparedRequest;

    fn build(&self, config: &RequestConfig) -> Result<PreparedRequest, ProxyClientError> {
        let target = Url::parse(&config.target).map_err(|source| ProxyClientError::InvalidTarget {
            target: config.target.clone(),
            source,
        })?;

        let mut proxy = Proxy::all(proxy_url(&config.proxy)?).map_err(ProxyClientError::Client)?;
        match &config.auth {
            AuthMethod::Basic { username, password } => {
                proxy = proxy.basic_auth(username, password);
            }
        }

        let client = Client::builder()
            .proxy(proxy)
            .danger_accept_invalid_certs(config.insecure)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProxyClientError::Client)?;

        let request = client.get(target).build().map_err(ProxyClientError::Client)?;

        Ok(PreparedRequest { client, request })
    }

    async fn send(&self, prepared: PreparedRequest) -> Result<u16, ProxyClientError> {
        let response = prepared
            .client
            .execute(prepared.request)
            .await
            .map_err(ProxyClientError::Send)?;
        Ok(response.status().as_u16())
    }
}
