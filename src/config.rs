//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! whatever was given on the command line or through the environment.
//!
//! ```yaml
//! cases_dir: test/cases
//! subject: build/ulpc
//! timeout: 30        # seconds, optional
//! color: auto        # auto | always | never
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use termcolor::ColorChoice;

use crate::errors::{CaseError, Result};

pub const DEFAULT_CASES_DIR: &str = "test/cases";
pub const DEFAULT_SUBJECT: &str = "build/ulpc";

/// When to colorize the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorWhen {
    /// Colorize when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    pub fn color_choice(self) -> ColorChoice {
        match self {
            ColorWhen::Always => ColorChoice::Always,
            ColorWhen::Never => ColorChoice::Never,
            ColorWhen::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorWhen::Auto => ColorChoice::Never,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub cases_dir: PathBuf,
    pub subject: PathBuf,
    pub timeout: Option<Duration>,
    pub color: ColorWhen,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cases_dir: PathBuf::from(DEFAULT_CASES_DIR),
            subject: PathBuf::from(DEFAULT_SUBJECT),
            timeout: None,
            color: ColorWhen::Auto,
        }
    }
}

/// A partial configuration; unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub cases_dir: Option<PathBuf>,
    pub subject: Option<PathBuf>,
    /// Per-case timeout in seconds.
    pub timeout: Option<u64>,
    pub color: Option<ColorWhen>,
}

impl ConfigLayer {
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
            .map_err(|e| CaseError::config_with_source("malformed config file", e))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CaseError::config_with_source(
                format!("cannot read config file '{}'", path.display()),
                e,
            )
        })?;
        Self::from_yaml(&text)
    }
}

impl RunConfig {
    /// Applies `layer` on top of `self`.
    pub fn merge(mut self, layer: ConfigLayer) -> Result<Self> {
        if let Some(cases_dir) = layer.cases_dir {
            self.cases_dir = cases_dir;
        }
        if let Some(subject) = layer.subject {
            self.subject = subject;
        }
        if let Some(secs) = layer.timeout {
            if secs == 0 {
                return Err(CaseError::config("timeout must be at least one second"));
            }
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(color) = layer.color {
            self.color = color;
        }
        Ok(self)
    }
}
