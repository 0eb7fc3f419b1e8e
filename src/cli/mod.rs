//! The casecheck command-line interface.
//!
//! Resolves the configuration, runs the suite, and turns the result into a
//! process exit code.

use std::process::ExitCode;

use clap::Parser;

use crate::{
    cli::{args::CasecheckArgs, output::ConsoleReporter},
    config::{ConfigLayer, RunConfig},
    errors::Result,
    runner::{CaseRunner, RunSummary},
    subject::Subject,
};

pub mod args;
pub mod output;

/// Exit codes of the `casecheck` binary.
pub enum CasecheckExitCode {}

impl CasecheckExitCode {
    /// Every case passed, or there were no cases.
    pub const OK: u8 = 0;

    /// At least one case failed or timed out.
    pub const CASES_FAILED: u8 = 1;

    /// The run was aborted by a configuration, discovery, or invocation error.
    pub const FATAL: u8 = 2;

    pub fn for_summary(summary: &RunSummary) -> u8 {
        if summary.fail_count() == 0 {
            Self::OK
        } else {
            Self::CASES_FAILED
        }
    }
}

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = CasecheckArgs::parse();

    match resolve_config(&args).and_then(|config| run_suite(&config)) {
        Ok(summary) => ExitCode::from(CasecheckExitCode::for_summary(&summary)),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(CasecheckExitCode::FATAL)
        }
    }
}

fn resolve_config(args: &CasecheckArgs) -> Result<RunConfig> {
    let file_layer = match &args.config {
        Some(path) => ConfigLayer::from_file(path)?,
        None => ConfigLayer::default(),
    };
    let config = RunConfig::default().merge(file_layer)?.merge(args.layer())?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Runs the whole suite described by `config`, reporting to stdout.
pub fn run_suite(config: &RunConfig) -> Result<RunSummary> {
    let subject = Subject::new(&config.subject).with_timeout(config.timeout);
    let reporter = ConsoleReporter::stdout(config.color.color_choice());
    CaseRunner::new(subject, reporter).run(&config.cases_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Outcome;

    #[test]
    fn exit_code_reflects_failures() {
        let mut summary = RunSummary::default();
        assert_eq!(CasecheckExitCode::for_summary(&summary), CasecheckExitCode::OK);
        summary.record(Outcome::Pass);
        assert_eq!(CasecheckExitCode::for_summary(&summary), CasecheckExitCode::OK);
        summary.record(Outcome::Timeout);
        assert_eq!(
            CasecheckExitCode::for_summary(&summary),
            CasecheckExitCode::CASES_FAILED
        );
    }
}
