//! Probing a matrix of targets through a fleet of proxies.
//!
//! ```text
//! Orchestrator::run
//!   ├── expand_matrix(config) → Vec<ProbeTask>
//!   ├── one tokio task per ProbeTask, sharing one deadline
//!   │   └── probe_one → ProxyClient::build / ProxyClient::send → ProbeOutcome
//!   ├── outcomes sent over an mpsc channel, in completion order
//!   └── join every task → AggregateResult
//! ```
//!
//! Failures of individual probes are data, never panics or early returns:
//! every task yields exactly one outcome and the run always covers the whole
//! matrix.

pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod result;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ProbeError, TransportError, report};
pub use executor::{ProbeOutcome, probe_one};
pub use orchestrator::Orchestrator;
pub use result::{AggregateResult, ProbeReport};
pub use task::{ProbeTask, expand_matrix};
