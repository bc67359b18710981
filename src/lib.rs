//! ptime - Process Timer
//!
//! A command-line utility that runs a child process to completion and
//! reports what it cost: wall-clock elapsed time, kernel/user CPU time
//! with percentages of elapsed, and memory counters (peak working set,
//! pool quotas, peak page-file usage, page faults).
//!
//! # Architecture
//!
//! The library is organized into four modules:
//!
//! - [`cmdline`]: Raw command-line scanning and token splitting
//! - [`measure`]: Process spawn, wait, and resource-usage collection
//! - [`report`]: Rendering the statistics report
//! - [`error`]: The error taxonomy for a timing run
//!
//! Control flow is strictly linear: extract the target command, spawn it,
//! block until it exits, collect its counters, print the report. Exactly
//! one child is spawned per run and every error is terminal.
//!
//! # Example
//!
//! ```rust,no_run
//! use ptime::cmdline::TargetCommand;
//! use ptime::measure::run_command;
//! use ptime::report;
//!
//! fn main() -> Result<(), ptime::error::TimerError> {
//!     let target = TargetCommand::from_raw("sleep 1").expect("non-empty command");
//!     let measurement = run_command(&target)?;
//!     report::print_report(&measurement, false);
//!     Ok(())
//! }
//! ```

pub mod cmdline;
pub mod error;
pub mod measure;
pub mod report;

// Re-export commonly used types
pub use cmdline::{extract_command, split_tokens, TargetCommand};
pub use error::TimerError;
pub use measure::{run_command, Measurement};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "ptime";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "ptime");
    }

    #[test]
    fn test_module_exports_extraction() {
        assert_eq!(extract_command("ptime true"), Some("true"));
    }

    #[test]
    fn test_module_exports_target_command() {
        let target = TargetCommand::from_raw("true").expect("non-empty command");
        assert_eq!(target.program(), "true");
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        for part in parts {
            assert!(part.parse::<u32>().is_ok(), "Version components should be numeric");
        }
    }
}
