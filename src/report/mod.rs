//! Turning an [`AggregateResult`] into log lines and an exit status.

use std::process::ExitCode;

use tracing::{error, info, warn};

use crate::probe::{AggregateResult, report as render};

/// Overall outcome of a matrix run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every probe passed, or there was nothing to probe.
    Success,
    /// Some probes failed, at least one passed. Still exits 0.
    PartialFailure,
    /// Every probe failed.
    Fatal,
}

impl Verdict {
    pub fn of(result: &AggregateResult) -> Self {
        if result.all_failed() {
            Verdict::Fatal
        } else if result.failures.is_empty() {
            Verdict::Success
        } else {
            Verdict::PartialFailure
        }
    }

    /// Process exit status: non-zero only when every probe failed.
    pub fn exit_status(self) -> u8 {
        match self {
            Verdict::Fatal => 1,
            Verdict::Success | Verdict::PartialFailure => 0,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Log every failure in collection order, then the summary, and return the
/// verdict.
pub fn report(result: &AggregateResult) -> Verdict {
    if !result.failures.is_empty() {
        warn!("errors happened during check:");
        for err in &result.failures {
            error!(
                kind = err.kind(),
                url = err.target(),
                proxy = err.proxy(),
                "{}",
                render(err)
            );
        }
    }

    let verdict = Verdict::of(result);
    if verdict == Verdict::Fatal {
        error!("all targets in error");
    }
    info!("{}/{} targets ok", result.success_count(), result.total);

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::probe::ProbeError;

    fn result(total: usize, failed: usize) -> AggregateResult {
        let mut result = AggregateResult::new(total);
        for i in 0..failed {
            result.record(Err(ProbeError::UnexpectedStatus {
                target: format!("https://t{i}"),
                proxy: "p1".to_string(),
                status: 503,
            }));
        }
        result
    }

    #[test]
    fn no_failures_is_success() {
        assert_eq!(report(&result(2, 0)), Verdict::Success);
    }

    #[test]
    fn empty_matrix_is_success() {
        let verdict = report(&result(0, 0));
        assert_eq!(verdict, Verdict::Success);
        assert_eq!(verdict.exit_status(), 0);
    }

    #[test]
    fn some_failures_still_exit_zero() {
        let verdict = report(&result(2, 1));
        assert_eq!(verdict, Verdict::PartialFailure);
        assert_eq!(verdict.exit_status(), 0);

        assert_eq!(Verdict::of(&result(5, 4)), Verdict::PartialFailure);
    }

    #[test]
    fn all_failures_is_fatal() {
        let verdict = report(&result(1, 1));
        assert_eq!(verdict, Verdict::Fatal);
        assert_eq!(verdict.exit_status(), 1);

        assert_eq!(Verdict::of(&result(6, 6)), Verdict::Fatal);
    }

    mod output {
        use super::*;

        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        /// Run `report` under a subscriber that records every formatted line.
        fn logged(result: &AggregateResult) -> (Verdict, Vec<String>) {
            let capture = Capture::default();
            let writer = capture.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .without_time()
                .finish();

            let verdict = tracing::subscriber::with_default(subscriber, || report(result));
            let text = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
            (verdict, text.lines().map(str::to_string).collect())
        }

        fn count(lines: &[String], needle: &str) -> usize {
            lines.iter().filter(|line| line.contains(needle)).count()
        }

        fn position(lines: &[String], needle: &str) -> usize {
            lines
                .iter()
                .position(|line| line.contains(needle))
                .unwrap_or_else(|| panic!("{needle:?} not logged in {lines:#?}"))
        }

        #[test]
        fn partial_failure_logs_each_failure_once() {
            let mut result = AggregateResult::new(2);
            result.record(Ok(()));
            result.record(Err(ProbeError::UnexpectedStatus {
                target: "https://b".to_string(),
                proxy: "p1".to_string(),
                status: 503,
            }));

            let (verdict, lines) = logged(&result);
            assert_eq!(verdict, Verdict::PartialFailure);
            assert_eq!(count(&lines, "errors happened during check:"), 1);
            assert_eq!(count(&lines, "got 503 (200 expected) to https://b via p1"), 1);
            assert_eq!(count(&lines, "all targets in error"), 0);
            assert_eq!(count(&lines, "1/2 targets ok"), 1);
            assert!(position(&lines, "got 503") < position(&lines, "1/2 targets ok"));
        }

        #[test]
        fn failures_are_logged_in_collection_order() {
            let (_, lines) = logged(&result(4, 3));
            let first = position(&lines, "to https://t0 via p1");
            let second = position(&lines, "to https://t1 via p1");
            let third = position(&lines, "to https://t2 via p1");
            assert!(first < second && second < third);
            for target in ["https://t0", "https://t1", "https://t2"] {
                assert_eq!(count(&lines, &format!("to {target} via p1")), 1);
            }
            assert_eq!(count(&lines, "1/4 targets ok"), 1);
        }

        #[test]
        fn total_failure_logs_fatal_line_and_summary() {
            let (verdict, lines) = logged(&result(1, 1));
            assert_eq!(verdict, Verdict::Fatal);
            assert_eq!(count(&lines, "got 503 (200 expected) to https://t0 via p1"), 1);
            assert_eq!(count(&lines, "all targets in error"), 1);
            assert_eq!(count(&lines, "0/1 targets ok"), 1);
        }

        #[test]
        fn empty_matrix_logs_zero_of_zero() {
            let (verdict, lines) = logged(&result(0, 0));
            assert_eq!(verdict, Verdict::Success);
            assert_eq!(count(&lines, "errors happened during check:"), 0);
            assert_eq!(count(&lines, "all targets in error"), 0);
            assert_eq!(count(&lines, "0/0 targets ok"), 1);
        }
    }
}
