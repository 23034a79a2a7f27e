//! In-memory [`ProxyClient`] whose behaviour is scripted per (target, proxy).

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::proxy_client::{ProxyClient, ProxyClientError, RequestConfig};

#[derive(Debug, Clone)]
pub enum Script {
    Status(u16),
    Delayed(Duration, u16),
    BuildError,
    SendError,
    Hang,
    Panic,
}

#[derive(Debug, Default)]
pub struct ScriptedClient {
    scripts: HashMap<(String, String), Script>,
    built: Mutex<Vec<RequestConfig>>,
    sent: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    /// Unscripted pairs answer 200.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: &str, proxy: &str, script: Script) -> Self {
        self.scripts
            .insert((target.to_string(), proxy.to_string()), script);
        self
    }

    pub fn built(&self) -> Vec<RequestConfig> {
        self.built.lock().unwrap().clone()
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn send_error() -> ProxyClientError {
    let err = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .expect_err("malformed url must not build");
    ProxyClientError::Send(err)
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ProxyClient for ScriptedClient {
    type Request = Script;

    fn build(&self, config: &RequestConfig) -> Result<Script, ProxyClientError> {
        self.built.lock().unwrap().push(config.clone());
        let script = self
            .scripts
            .get(&(config.target.clone(), config.proxy.clone()))
            .cloned()
            .unwrap_or(Script::Status(200));

        match script {
            Script::BuildError => Err(ProxyClientError::InvalidProxy {
                proxy: config.proxy.clone(),
                source: url::ParseError::EmptyHost,
            }),
            script => Ok(script),
        }
    }

    async fn send(&self, script: Script) -> Result<u16, ProxyClientError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match script {
            Script::Status(status) => {
                tokio::task::yield_now().await;
                Ok(status)
            }
            Script::Delayed(delay, status) => {
                tokio::time::sleep(delay).await;
                Ok(status)
            }
            Script::SendError => Err(send_error()),
            Script::Hang => std::future::pending().await,
            Script::Panic => panic!("scripted probe panic"),
            Script::BuildError => unreachable!("build errors never reach send"),
        }
    }
}
