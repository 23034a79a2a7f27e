use tokio::time::Instant;
use tracing::debug;

use crate::config::Config;
use crate::proxy_client::{AuthMethod, ProxyClient, RequestConfig};

use super::error::{ProbeError, TransportError};
use super::task::ProbeTask;

/// Result of one probe: success carries nothing, failure says why.
pub type ProbeOutcome = Result<(), ProbeError>;

/// Run a single probe to completion.
///
/// Builds the request through `client`, sends it (bounded by `deadline` when
/// one is given) and accepts exactly status 200. A single attempt is made.
pub async fn probe_one<C: ProxyClient>(
    client: &C,
    config: &Config,
    task: &ProbeTask,
    deadline: Option<Instant>,
) -> ProbeOutcome {
    let request_config = RequestConfig {
        target: task.target.clone(),
        proxy: task.proxy.clone(),
        auth: AuthMethod::Basic {
            username: config.username.clone(),
            password: config.password.clone(),
        },
        insecure: config.insecure,
    };

    let request = client
        .build(&request_config)
        .map_err(|source| ProbeError::RequestBuild {
            target: task.target.clone(),
            proxy: task.proxy.clone(),
            source,
        })?;

    debug!(url = %task.target, proxy = %task.proxy, "testing target with proxy");

    let sent = match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, client.send(request)).await {
            Ok(sent) => sent.map_err(TransportError::from),
            Err(_) => Err(TransportError::DeadlineExceeded),
        },
        None => client.send(request).await.map_err(TransportError::from),
    };

    let status = sent.map_err(|source| ProbeError::Transport {
        target: task.target.clone(),
        proxy: task.proxy.clone(),
        source,
    })?;

    if status != 200 {
        return Err(ProbeError::UnexpectedStatus {
            target: task.target.clone(),
            proxy: task.proxy.clone(),
            status,
        });
    }

    Ok(())
}
