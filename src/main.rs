//! ptime CLI Entry Point
//!
//! Runs a command to completion and prints its resource-usage report.
//!
//! # Usage
//!
//! ```bash
//! # Time a command
//! ptime sleep 1
//!
//! # Arguments after the command are passed through verbatim
//! ptime grep -r "needle" /var/log
//!
//! # Disable colored output
//! ptime --no-color make -j4
//! ```
//!
//! On success the child's own exit code becomes ptime's exit code; any
//! failure of the timer itself exits with status 1.

use std::io::IsTerminal;
use std::process;

use colored::Colorize;
use log::debug;

use ptime::cmdline::{extract_command, raw_invocation_line, TargetCommand};
use ptime::error::{TimerError, FAILURE_STATUS};
use ptime::{measure, report, APP_NAME, VERSION};

/// Run settings decided before the child is spawned.
#[derive(Debug)]
struct Config {
    /// Colorize the banner, the elapsed-time line, and errors.
    color: bool,
    /// Raise the log filter from info to debug.
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
            verbose: false,
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the startup banner with version information.
fn print_banner(color: bool) {
    let banner = format!("{} [{}]", APP_NAME, VERSION);
    if color {
        println!("{}", banner.blue().bold());
    } else {
        println!("{}", banner);
    }
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: {} [OPTIONS] <COMMAND> [ARGS...]", APP_NAME);
    println!();
    println!("Runs COMMAND to completion and reports its elapsed time,");
    println!("kernel/user CPU time, and memory usage.");
    println!();
    println!("Options (recognized only before COMMAND):");
    println!("  --no-color          Disable colored output");
    println!("  --verbose, -v       Enable debug logging");
    println!("  --help, -h          Show this help message");
    println!("  --version, -V       Show version information");
    println!("  --                  End of options; everything after is the command");
    println!();
    println!("Examples:");
    println!("  {} sleep 1", APP_NAME);
    println!("  {} \"my app.exe\" input.txt", APP_NAME);
    println!("  {} --no-color make -j4", APP_NAME);
    println!("  {} -- --version-printing-tool", APP_NAME);
}

/// Splits a recognized leading option off the front of the command text.
///
/// Returns the option token and the remainder with separator whitespace
/// consumed. Anything not starting with `-` belongs to the measured
/// command and is left alone.
fn split_leading_option(rest: &str) -> Option<(&str, &str)> {
    if !rest.starts_with('-') {
        return None;
    }
    let end = rest.find([' ', '\t']).unwrap_or(rest.len());
    let (option, tail) = rest.split_at(end);
    Some((option, tail.trim_start_matches([' ', '\t'])))
}

/// Builds the measured command from the verbatim remainder text, which
/// is handed to the process-creation call unchanged.
#[cfg(windows)]
fn build_target(command_text: &str, _options_consumed: usize) -> Option<TargetCommand> {
    TargetCommand::from_raw(command_text)
}

/// Builds the measured command from the original argument vector.
///
/// Skipping our own name plus the consumed options leaves the user's
/// entries untouched, so arguments containing quotes or whitespace reach
/// the child byte-for-byte (the reconstructed text is only scanned and
/// logged, never re-split for spawning).
#[cfg(not(windows))]
fn build_target(_command_text: &str, options_consumed: usize) -> Option<TargetCommand> {
    TargetCommand::from_argv(std::env::args().skip(1 + options_consumed).collect())
}

/// Main application flow: extract the command, measure it, report.
///
/// Returns the exit code this process should terminate with.
fn run() -> Result<i32, TimerError> {
    let raw_line = raw_invocation_line();

    let mut config = Config::default();

    // Strip our own program name; what remains is the user's text.
    let mut rest = extract_command(&raw_line);

    // Peel recognized options off the front. Scanning stops at `--` or at
    // the first token that is not one of ours, so the measured command's
    // own flags are never consumed. Each option is exactly one argument
    // vector entry, which build_target relies on.
    let mut options_consumed = 0usize;
    while let Some(r) = rest {
        match split_leading_option(r) {
            Some(("--help" | "-h", _)) => {
                print_usage();
                return Ok(0);
            }
            Some(("--version" | "-V", _)) => {
                println!("{} {}", APP_NAME, VERSION);
                return Ok(0);
            }
            Some(("--verbose" | "-v", tail)) => {
                config.verbose = true;
                options_consumed += 1;
                rest = (!tail.is_empty()).then_some(tail);
            }
            Some(("--no-color", tail)) => {
                config.color = false;
                options_consumed += 1;
                rest = (!tail.is_empty()).then_some(tail);
            }
            Some(("--", tail)) => {
                options_consumed += 1;
                rest = (!tail.is_empty()).then_some(tail);
                break;
            }
            _ => break,
        }
    }

    setup_logging(config.verbose);
    print_banner(config.color);

    let command = rest.ok_or(TimerError::Usage)?;

    debug!("Raw line: {}", raw_line);
    debug!("Invoked : {}", command);

    let target = build_target(command, options_consumed).ok_or(TimerError::Usage)?;

    let measurement = measure::run_command(&target)?;
    report::print_report(&measurement, config.color);

    Ok(measurement.exit_code)
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            let color = std::io::stderr().is_terminal();
            let message = format!("Error: {}", e);
            if color {
                eprintln!("{}", message.red().bold());
            } else {
                eprintln!("{}", message);
            }
            if e.is_usage() {
                println!();
                print_usage();
            }
            process::exit(FAILURE_STATUS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_leading_option_basic() {
        assert_eq!(
            split_leading_option("--no-color sleep 1"),
            Some(("--no-color", "sleep 1"))
        );
    }

    #[test]
    fn test_split_leading_option_last_token() {
        assert_eq!(split_leading_option("--verbose"), Some(("--verbose", "")));
    }

    #[test]
    fn test_split_leading_option_non_option() {
        assert_eq!(split_leading_option("sleep 1"), None);
        assert_eq!(split_leading_option("\"my app\" -x"), None);
    }

    #[test]
    fn test_split_leading_option_double_dash() {
        assert_eq!(
            split_leading_option("-- echo --version"),
            Some(("--", "echo --version"))
        );
    }

    #[test]
    fn test_split_leading_option_consumes_separator_run() {
        assert_eq!(
            split_leading_option("-v \t sleep 1"),
            Some(("-v", "sleep 1"))
        );
    }
}
