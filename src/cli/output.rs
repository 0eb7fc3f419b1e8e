//! Handles all user-facing report output.
//!
//! The reporter writes to any `WriteColor`, so the CLI can hand it a
//! `StandardStream` and tests can hand it a `termcolor::Buffer`. With colors
//! disabled the text is exactly the plain report.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    discovery::TestCase,
    runner::{Outcome, RunSummary},
};

/// Receives run progress as it happens.
pub trait Reporter {
    fn run_started(&mut self) -> io::Result<()>;
    fn case_finished(&mut self, case: &TestCase, outcome: Outcome) -> io::Result<()>;
    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Line-oriented console report.
pub struct ConsoleReporter<W> {
    out: W,
}

impl ConsoleReporter<StandardStream> {
    pub fn stdout(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_colored(&mut self, text: &str, spec: &ColorSpec) -> io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }
}

impl<W: WriteColor> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self) -> io::Result<()> {
        writeln!(self.out, "Running test suite...")?;
        writeln!(self.out)
    }

    fn case_finished(&mut self, case: &TestCase, outcome: Outcome) -> io::Result<()> {
        let color = if outcome.is_pass() {
            Color::Green
        } else {
            Color::Red
        };
        write!(self.out, "\t{} ", case.name)?;
        self.write_colored(outcome.label(), ColorSpec::new().set_fg(Some(color)))?;
        writeln!(self.out)
    }

    fn run_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        let passes = format!("{} passes", summary.pass_count());
        let failures = format!("{} failures", summary.fail_count());

        write!(self.out, "\n{} tests, ", summary.total())?;

        if summary.pass_count() == 0 {
            write!(self.out, "{}", passes)?;
        } else {
            self.write_colored(
                &passes,
                ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            )?;
        }

        write!(self.out, " and ")?;

        if summary.all_passed() {
            write!(self.out, "{}", failures)?;
        } else {
            self.write_colored(
                &failures,
                ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true),
            )?;
        }

        writeln!(self.out, ".")?;
        self.out.flush()
    }
}
