//! Process Measurement Module
//!
//! The core of the timer: spawns the target command, blocks until it
//! exits, and collects its cost into a [`Measurement`].
//!
//! # Components
//!
//! - [`usage`]: Platform resource-usage and timing collection
//!
//! Control flow is strictly linear (spawn → wait → collect) with a single
//! error branch at each step; there is no concurrency and no retry.

pub mod usage;

use std::io;
use std::process::{Child, Command};
use std::time::Instant;

use log::debug;

use crate::cmdline::TargetCommand;
use crate::error::TimerError;

/// Resource-usage statistics of one completed child process.
///
/// Built only after the child has fully exited, never mutated afterwards,
/// and discarded once printed. Kernel plus user time can exceed elapsed
/// time on multi-core machines, so percentages of elapsed may exceed 100%.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Exit status reported by the child.
    pub exit_code: i32,
    /// Wall-clock time between process creation and exit, in seconds.
    pub elapsed_seconds: f64,
    /// Accumulated kernel-mode CPU time, in seconds.
    pub kernel_seconds: f64,
    /// Accumulated user-mode CPU time, in seconds.
    pub user_seconds: f64,
    /// Peak working-set size, in kilobytes.
    pub peak_working_set_kb: u64,
    /// Peak paged-pool quota usage, in kilobytes (0 where not tracked).
    pub paged_pool_kb: u64,
    /// Peak non-paged-pool quota usage, in kilobytes (0 where not tracked).
    pub nonpaged_pool_kb: u64,
    /// Peak page-file usage, in kilobytes (0 where not tracked).
    pub peak_pagefile_kb: u64,
    /// Total number of page faults.
    pub page_fault_count: u64,
}

/// Runs a command to completion and measures its resource usage.
///
/// Standard streams are inherited from the caller; the wait blocks
/// without timeout until the child exits.
///
/// # Errors
///
/// * [`TimerError::Spawn`] when the OS cannot create the process
/// * [`TimerError::Wait`] when the wait call itself fails
/// * [`TimerError::Collection`] when the exit code or resource counters
///   cannot be retrieved after the child has run
pub fn run_command(target: &TargetCommand) -> Result<Measurement, TimerError> {
    debug!("Spawning: {}", target.text());

    let started = Instant::now();
    let mut child = spawn(target).map_err(TimerError::Spawn)?;

    let status = child.wait().map_err(TimerError::Wait)?;
    let wall = started.elapsed();

    debug!("Child exited with status: {:?}", status);

    // The Child handle stays open until drop, so the platform collectors
    // can still query it here.
    usage::collect(&child, status, wall)
}

/// Creates the child process, handing the command line through verbatim.
///
/// The first token names the program; the rest of the text is appended
/// to the process command line exactly as typed.
#[cfg(windows)]
fn spawn(target: &TargetCommand) -> io::Result<Child> {
    use std::os::windows::process::CommandExt;

    let mut cmd = Command::new(target.program());
    if let Some(rest) = crate::cmdline::extract_command(target.text()) {
        cmd.raw_arg(rest);
    }
    cmd.spawn()
}

/// Creates the child process from the command's argument vector.
///
/// The entries pass through to `Command::args` untouched, so arguments
/// containing quotes or whitespace reach the child byte-for-byte.
#[cfg(not(windows))]
fn spawn(target: &TargetCommand) -> io::Result<Child> {
    Command::new(target.program()).args(target.args()).spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(command: &str) -> TargetCommand {
        TargetCommand::from_raw(command).expect("non-empty command")
    }

    fn argv(entries: &[&str]) -> TargetCommand {
        TargetCommand::from_argv(entries.iter().map(|s| s.to_string()).collect())
            .expect("non-empty argv")
    }

    #[test]
    #[cfg(unix)]
    fn test_run_trivial_command() {
        let m = run_command(&raw("true")).expect("true should run");
        assert_eq!(m.exit_code, 0);
        assert!(m.elapsed_seconds >= 0.0);
        assert!(m.elapsed_seconds < 5.0);
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_code_is_propagated() {
        let m = run_command(&raw(r#"sh -c "exit 42""#)).expect("sh should run");
        assert_eq!(m.exit_code, 42);
    }

    #[test]
    #[cfg(unix)]
    fn test_cpu_times_are_non_negative() {
        let m = run_command(&raw("true")).unwrap();
        assert!(m.kernel_seconds >= 0.0);
        assert!(m.user_seconds >= 0.0);
    }

    #[test]
    fn test_spawn_nonexistent_is_spawn_error() {
        let err = run_command(&raw("does_not_exist_12345.exe")).unwrap_err();
        assert!(matches!(err, TimerError::Spawn(_)));
    }

    #[test]
    #[cfg(unix)]
    fn test_quoted_argument_reaches_child_as_one_token() {
        // sh must see "a b" as a single positional argument, so $# is 1
        let m = run_command(&raw(r#"sh -c "exit $#" sh "a b""#)).expect("sh should run");
        assert_eq!(m.exit_code, 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_argv_entry_with_embedded_quotes_survives() {
        // The argv path must deliver a quote-bearing argument verbatim:
        // $1 compares equal only if no re-splitting happened.
        let m = run_command(&argv(&[
            "sh",
            "-c",
            r#"test "$1" = 'a "b" c'"#,
            "sh",
            r#"a "b" c"#,
        ]))
        .expect("sh should run");
        assert_eq!(m.exit_code, 0);
    }

    #[test]
    #[cfg(unix)]
    fn test_argv_entry_with_whitespace_survives() {
        let m = run_command(&argv(&["sh", "-c", "exit $#", "sh", "a b"]))
            .expect("sh should run");
        assert_eq!(m.exit_code, 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_sleeping_child_elapsed() {
        let m = run_command(&raw("sleep 0.2")).expect("sleep should run");
        assert!(m.elapsed_seconds >= 0.15, "elapsed was {}", m.elapsed_seconds);
        assert!(m.elapsed_seconds < 5.0);
    }
}
