//! Defines the command-line arguments for the casecheck CLI.
//!
//! This module uses the `clap` crate with its "derive" feature. Every option
//! is optional so that unset values fall through to the config file and the
//! built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ColorWhen, ConfigLayer};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "casecheck",
    version,
    about = "Runs a subject program against every case file and reports pass/fail by exit status."
)]
pub struct CasecheckArgs {
    /// Directory holding one file per test case [default: test/cases].
    #[arg(env = "CASECHECK_CASES_DIR")]
    pub cases_dir: Option<PathBuf>,

    /// Program under test, invoked as `<subject> --silent <case>` [default: build/ulpc].
    #[arg(short, long, env = "CASECHECK_SUBJECT")]
    pub subject: Option<PathBuf>,

    /// Kill a case that runs longer than this many seconds and report it as a timeout.
    #[arg(short, long, value_name = "SECS", env = "CASECHECK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// YAML file with default settings.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// When to colorize the report.
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorWhen>,
}

impl CasecheckArgs {
    /// The command-line layer of the configuration.
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            cases_dir: self.cases_dir.clone(),
            subject: self.subject.clone(),
            timeout: self.timeout,
            color: self.color,
        }
    }
}
