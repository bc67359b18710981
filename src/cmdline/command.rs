//! Target Command Representation
//!
//! Carries the command to measure in the two forms the platforms need:
//! the command-line text (Windows spawn and logging) and an argument
//! vector (Unix spawn). Building from an argument vector never re-parses
//! the entries, so arguments containing quotes or whitespace reach the
//! child exactly as the caller received them.

use crate::cmdline::scanner::{raw_from_args, split_tokens};

/// The command to measure, ready for the spawn call.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCommand {
    tokens: Vec<String>,
    text: String,
}

impl TargetCommand {
    /// Builds the command from argument-vector entries, untouched.
    ///
    /// The first entry names the program; the rest are its arguments,
    /// one entry each, handed to the spawn call as-is. The stored text
    /// is a re-quoted rendering kept for logging only. Returns `None`
    /// for an empty vector.
    pub fn from_argv(args: Vec<String>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        let text = raw_from_args(&args);
        Some(Self {
            tokens: args,
            text,
        })
    }

    /// Builds the command from verbatim command-line text.
    ///
    /// The text is kept byte-for-byte for platforms that spawn from a
    /// single command-line string; the token split (double quotes group,
    /// no escapes) serves the others. Returns `None` when the text holds
    /// no tokens.
    pub fn from_raw(text: &str) -> Option<Self> {
        let tokens = split_tokens(text);
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            tokens,
            text: text.to_string(),
        })
    }

    /// The program to execute (the first token).
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// The program's arguments, one entry each.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// The command-line text: verbatim when built from raw text, a
    /// re-quoted rendering when built from an argument vector.
    pub fn text(&self) -> &str {
        &self.text
    }
}
