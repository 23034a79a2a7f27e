use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::proxy_client::ProxyClient;

use super::error::ProbeError;
use super::executor::probe_one;
use super::result::{AggregateResult, ProbeReport};
use super::task::expand_matrix;

/// Runs every (target, proxy) probe of a [`Config`] concurrently and
/// aggregates the failures.
pub struct Orchestrator<C> {
    client: Arc<C>,
    config: Arc<Config>,
}

impl<C: ProxyClient> Orchestrator<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }

    /// Probe the whole matrix once.
    ///
    /// One task is spawned per matrix cell, all sharing a single deadline
    /// computed before dispatch. Returns only after every task has finished.
    /// Failures, including units that panicked, are listed in the order
    /// they completed.
    pub async fn run(&self) -> AggregateResult {
        let tasks = expand_matrix(&self.config);
        let mut result = AggregateResult::new(tasks.len());

        let budget = self.config.deadline_budget();
        // A budget too large to represent is no deadline at all.
        let deadline = budget.and_then(|budget| Instant::now().checked_add(budget));
        match budget {
            Some(timeout) => info!("running {} tests (timeout {:?})...", tasks.len(), timeout),
            None => info!("running {} tests...", tasks.len()),
        }

        let limiter = self
            .config
            .concurrency
            .map(|n| Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS))));
        let (tx, mut rx) = mpsc::unbounded_channel::<ProbeReport>();
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let client = self.client.clone();
            let config = self.config.clone();
            let limiter = limiter.clone();
            let tx = tx.clone();
            let unit_task = task.clone();

            let handle = tokio::spawn(async move {
                // Held until the probe is done.
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };

                // Run the check in its own task so a panic still reports.
                let inner_task = unit_task.clone();
                let inner = tokio::spawn(async move {
                    probe_one(client.as_ref(), &config, &inner_task, deadline).await
                });
                let outcome = match inner.await {
                    Ok(outcome) => outcome,
                    Err(source) => Err(ProbeError::Aborted {
                        target: unit_task.target.clone(),
                        proxy: unit_task.proxy.clone(),
                        source,
                    }),
                };
                let _ = tx.send(ProbeReport {
                    task: unit_task,
                    outcome,
                });
            });

            handles.push((task, handle));
        }
        drop(tx);

        // A unit cancelled before reporting is accounted for here.
        let mut aborted = Vec::new();
        for (task, handle) in handles {
            if let Err(source) = handle.await {
                aborted.push(ProbeError::Aborted {
                    target: task.target,
                    proxy: task.proxy,
                    source,
                });
            }
        }

        // Every sender is gone, so this drains in completion order and ends.
        while let Some(report) = rx.recv().await {
            debug!(task = %report.task, ok = report.outcome.is_ok(), "probe finished");
            result.record(report.outcome);
        }
        result.failures.extend(aborted);

        result
    }
}
