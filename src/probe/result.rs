use super::error::ProbeError;
use super::executor::ProbeOutcome;
use super::task::ProbeTask;

/// What one concurrent unit hands back to the orchestrator.
#[derive(Debug)]
pub struct ProbeReport {
    pub task: ProbeTask,
    pub outcome: ProbeOutcome,
}

/// Failures of a whole matrix run, in completion order, plus the task count.
/// Successes are only counted.
#[derive(Debug, Default)]
pub struct AggregateResult {
    pub total: usize,
    pub failures: Vec<ProbeError>,
}

impl AggregateResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ProbeOutcome) {
        if let Err(err) = outcome {
            self.failures.push(err);
        }
    }

    pub fn success_count(&self) -> usize {
        self.total.saturating_sub(self.failures.len())
    }

    /// True when there was at least one probe and none of them passed.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.failures.len() == self.total
    }
}
