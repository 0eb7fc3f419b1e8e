//! Error handling for casecheck.
//!
//! Only conditions that stop a run are errors. A subject that runs and exits
//! non-zero is an ordinary [`Outcome::Fail`](crate::runner::Outcome) and never
//! shows up here.

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = CaseError> = std::result::Result<T, E>;

/// Every failure mode that aborts a run.
#[derive(Debug, Error, Diagnostic)]
pub enum CaseError {
    /// The case directory is missing, unreadable, or not a directory.
    #[error("cannot read case directory '{}'", path.display())]
    #[diagnostic(
        code(casecheck::discovery),
        help("check that the case directory exists and is readable")
    )]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The subject program could not be launched or waited on.
    #[error("cannot run subject '{}' on case '{case}'", subject.display())]
    #[diagnostic(
        code(casecheck::invocation),
        help("the subject binary may not be built yet; check the --subject path")
    )]
    Invocation {
        subject: PathBuf,
        case: String,
        #[source]
        source: io::Error,
    },

    /// The configuration file or a configuration value is invalid.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(casecheck::config))]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// Writing the report failed.
    #[error("failed to write report")]
    #[diagnostic(code(casecheck::io))]
    Output(#[from] io::Error),
}

impl CaseError {
    pub fn discovery(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CaseError::Discovery {
            path: path.into(),
            source,
        }
    }

    pub fn invocation(subject: impl Into<PathBuf>, case: &str, source: io::Error) -> Self {
        CaseError::Invocation {
            subject: subject.into(),
            case: case.to_string(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CaseError::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CaseError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
