//! Command-Line Handling Module
//!
//! Provides utilities for working with the raw invocation line:
//! isolating the target command from the timer's own program name,
//! and splitting a command string into an argument vector.
//!
//! # Components
//!
//! - [`scanner`]: Finite-state scanning of the raw command line
//! - [`command`]: The target command as handed to the spawn call

pub mod command;
pub mod scanner;

pub use command::TargetCommand;
pub use scanner::{extract_command, raw_invocation_line, split_tokens};
