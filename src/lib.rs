pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod runner;
pub mod subject;

pub use crate::config::RunConfig;
pub use crate::discovery::{CaseDiscoverer, TestCase};
pub use crate::errors::CaseError;
pub use crate::runner::{classify, CaseRunner, Outcome, RunSummary};
pub use crate::subject::{CaseExecutor, ExecutionResult, Subject};
