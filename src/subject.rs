//! Invocation of the subject program.
//!
//! The subject is spawned directly with an argument array; no shell sits in
//! between, so case file names are never interpreted.

use std::{
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use crate::{
    discovery::TestCase,
    errors::{CaseError, Result},
};

/// Flag passed to the subject before the case path.
pub const SILENT_FLAG: &str = "--silent";

/// Status reported when the process gives neither an exit code nor a signal.
pub const UNKNOWN_STATUS: i32 = -1;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The outcome of running the subject once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub case: TestCase,
    pub status: i32,
    pub timed_out: bool,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn exited(case: TestCase, status: i32) -> Self {
        Self {
            case,
            status,
            timed_out: false,
            duration: Duration::ZERO,
        }
    }
}

/// Runs one case and reports how it ended.
///
/// [`Subject`] is the process-spawning implementation; the runner only sees
/// this trait.
pub trait CaseExecutor {
    fn execute(&mut self, directory: &Path, case: &TestCase) -> Result<ExecutionResult>;
}

/// The external program under test.
///
/// On Unix each invocation gets its own process group, so a timeout kills
/// anything the subject forked along with the subject itself.
#[derive(Debug, Clone)]
pub struct Subject {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl Subject {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command(&self, case_path: &Path) -> Command {
        let mut command = Command::new(&self.path);
        command
            .arg(SILENT_FLAG)
            .arg(case_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        set_process_group(&mut command);
        command
    }

    fn wait_with_deadline(
        &self,
        child: &mut Child,
        timeout: Duration,
        case: &TestCase,
    ) -> Result<(ExitStatus, bool)> {
        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok((status, false)),
                Ok(None) if started.elapsed() >= timeout => {
                    // The child may exit between try_wait and kill.
                    kill_process_group(child);
                    let status = child
                        .wait()
                        .map_err(|e| CaseError::invocation(&self.path, &case.name, e))?;
                    return Ok((status, true));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(CaseError::invocation(&self.path, &case.name, e)),
            }
        }
    }
}

impl CaseExecutor for Subject {
    fn execute(&mut self, directory: &Path, case: &TestCase) -> Result<ExecutionResult> {
        let case_path = case.path_in(directory);
        let started = Instant::now();

        let mut child = self
            .command(&case_path)
            .spawn()
            .map_err(|e| CaseError::invocation(&self.path, &case.name, e))?;

        let (status, timed_out) = match self.timeout {
            Some(timeout) => self.wait_with_deadline(&mut child, timeout, case)?,
            None => {
                let status = child
                    .wait()
                    .map_err(|e| CaseError::invocation(&self.path, &case.name, e))?;
                (status, false)
            }
        };

        let result = ExecutionResult {
            case: case.clone(),
            status: status_code(status),
            timed_out,
            duration: started.elapsed(),
        };

        if timed_out {
            tracing::warn!(
                case = %case.name,
                timeout_ms = self.timeout.map_or(0, millis),
                "subject timed out"
            );
        } else {
            tracing::debug!(
                subject = %self.path.display(),
                case = %case_path.display(),
                status = result.status,
                elapsed_ms = millis(result.duration),
                "subject exited"
            );
        }
        Ok(result)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(unix)]
fn set_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn set_process_group(_command: &mut Command) {}

/// Kills the child and every process in its group.
#[cfg(unix)]
fn kill_process_group(child: &mut Child) {
    match libc::pid_t::try_from(child.id()) {
        // The child leads its own group, so its pid is the group id.
        Ok(pgid) => unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        },
        Err(_) => {
            let _ = child.kill();
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) {
    let _ = child.kill();
}

/// Flattens an exit status into a single integer.
///
/// Signal deaths are reported as `128 + signal`, the same value a POSIX shell
/// would put in `$?`.
pub fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    signal_code(status).unwrap_or(UNKNOWN_STATUS)
}

#[cfg(unix)]
fn signal_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_code(_status: ExitStatus) -> Option<i32> {
    None
}
