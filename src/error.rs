//! Error Types
//!
//! Defines the error taxonomy for a timing run. Every error is terminal:
//! a run is a single spawn/wait/collect attempt, so there is nothing to
//! retry and nothing to recover mid-run.

use std::io;

use thiserror::Error;

/// Exit status used for every failure of the timer itself.
///
/// Distinct from the measured child's exit code, which is propagated
/// unchanged on success.
pub const FAILURE_STATUS: i32 = 1;

/// Errors that can occur during a timing run.
#[derive(Debug, Error)]
pub enum TimerError {
    /// No target command was supplied on the command line.
    #[error("no command given")]
    Usage,

    /// The operating system could not create the child process.
    #[error("cannot create process: {0}")]
    Spawn(#[source] io::Error),

    /// Waiting for the child process failed at the OS level.
    #[error("cannot wait for process: {0}")]
    Wait(#[source] io::Error),

    /// The child ran, but its exit code or resource counters could not
    /// be retrieved. No partial report is produced in this case.
    #[error("cannot collect process statistics: {0}")]
    Collection(#[source] io::Error),
}

impl TimerError {
    /// Returns true for errors that should be followed by the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, TimerError::Usage)
    }
}
