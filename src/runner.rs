//! Sequential case runner.
//!
//! Cases run one after another on the calling thread. A case that fails is
//! recorded and the run moves on; only discovery and invocation errors stop it.

use std::path::Path;

use crate::{
    cli::output::Reporter,
    discovery::CaseDiscoverer,
    errors::Result,
    subject::{CaseExecutor, ExecutionResult},
};

/// Classification of a single execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    /// The subject outlived the per-case timeout and was killed.
    Timeout,
}

impl Outcome {
    pub fn is_pass(self) -> bool {
        self == Outcome::Pass
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
            Outcome::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// PASS iff the subject exited with status 0 on its own.
pub fn classify(result: &ExecutionResult) -> Outcome {
    if result.timed_out {
        Outcome::Timeout
    } else if result.status == 0 {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

/// Aggregate counters for a run.
///
/// Failures are not stored; they are always `total - passes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    total: usize,
    pass_count: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: Outcome) {
        self.total += 1;
        if outcome.is_pass() {
            self.pass_count += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    pub fn fail_count(&self) -> usize {
        self.total - self.pass_count
    }

    pub fn all_passed(&self) -> bool {
        self.pass_count == self.total
    }
}

/// Runs every case of a directory through an executor.
pub struct CaseRunner<E, R> {
    executor: E,
    reporter: R,
}

impl<E: CaseExecutor, R: Reporter> CaseRunner<E, R> {
    pub fn new(executor: E, reporter: R) -> Self {
        Self { executor, reporter }
    }

    pub fn into_parts(self) -> (E, R) {
        (self.executor, self.reporter)
    }

    /// Discovers the cases in `directory`, runs each one, and returns the
    /// totals.
    ///
    /// Discovery happens before anything is reported, so a missing directory
    /// produces no output at all.
    pub fn run(&mut self, directory: &Path) -> Result<RunSummary> {
        let cases = CaseDiscoverer::discover_cases(directory)?;

        self.reporter.run_started()?;

        let mut summary = RunSummary::default();
        for case in &cases {
            let result = self.executor.execute(directory, case)?;
            let outcome = classify(&result);
            summary.record(outcome);
            self.reporter.case_finished(case, outcome)?;
        }

        self.reporter.run_finished(&summary)?;

        tracing::info!(
            total = summary.total(),
            passed = summary.pass_count(),
            failed = summary.fail_count(),
            "run finished"
        );
        Ok(summary)
    }
}
