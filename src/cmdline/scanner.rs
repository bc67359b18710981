//! Raw Command-Line Scanning
//!
//! The timer receives its target as free text after its own program name,
//! and must hand that text to the process-spawn call verbatim, preserving
//! the user's original quoting. The functions here do the minimal character
//! scanning required: skipping the first token (which may be a double-quoted
//! path containing spaces) and, where the spawn API wants an argv instead of
//! a single string, splitting on unquoted whitespace.
//!
//! Quotes are not escapable inside a token: a double quote is not a valid
//! path character on Windows, and the original `time` utility relies on the
//! same rule.

/// Scanner state while stripping the leading program-name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Inside a double-quoted first token; ends at the closing quote.
    InQuotedToken,
    /// Inside an unquoted first token; ends at a space or tab.
    InBareToken,
    /// Past the first token, consuming separator whitespace.
    SkippingWhitespace,
}

/// Isolates the target command from a raw invocation line.
///
/// Skips the first whitespace-delimited token (the timer's own name). If
/// that token opens with a double quote, it extends to the closing quote
/// instead, so program paths containing spaces are handled. Any spaces or
/// tabs after the first token are consumed.
///
/// Returns the remainder of the line byte-for-byte as the user typed it,
/// or `None` when nothing follows the first token (a usage error for the
/// caller).
///
/// # Example
///
/// ```rust
/// use ptime::cmdline::extract_command;
///
/// assert_eq!(extract_command("timer.exe notepad.exe file.txt"),
///            Some("notepad.exe file.txt"));
/// assert_eq!(extract_command("\"timer.exe\" notepad.exe"),
///            Some("notepad.exe"));
/// assert_eq!(extract_command("timer.exe"), None);
/// ```
pub fn extract_command(raw_line: &str) -> Option<&str> {
    let mut state = match raw_line.chars().next() {
        Some('"') => ScanState::InQuotedToken,
        Some(_) => ScanState::InBareToken,
        None => return None,
    };

    for (idx, ch) in raw_line.char_indices() {
        match state {
            ScanState::InQuotedToken => {
                // idx 0 is the opening quote itself
                if idx > 0 && ch == '"' {
                    state = ScanState::SkippingWhitespace;
                }
            }
            ScanState::InBareToken => {
                if ch == ' ' || ch == '\t' {
                    state = ScanState::SkippingWhitespace;
                }
            }
            ScanState::SkippingWhitespace => {
                if ch != ' ' && ch != '\t' {
                    return Some(&raw_line[idx..]);
                }
            }
        }
    }

    // Line ended inside the first token or in trailing whitespace.
    None
}

/// Splits a command string into tokens, honoring double quotes.
///
/// Quoted regions group their contents into one token and the quotes are
/// stripped; quotes do not nest and cannot be escaped. Used on platforms
/// whose spawn API takes a program plus argument vector rather than a
/// single command-line string.
pub fn split_tokens(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in command.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            ' ' | '\t' if !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            _ => {
                current.push(ch);
                has_token = true;
            }
        }
    }

    if has_token {
        tokens.push(current);
    }

    tokens
}

/// Returns the raw invocation line of the current process.
///
/// On Windows this is the exact string the process was created with.
#[cfg(windows)]
pub fn raw_invocation_line() -> String {
    use windows_sys::Win32::System::Environment::GetCommandLineW;

    // SAFETY: GetCommandLineW returns a pointer to a NUL-terminated UTF-16
    // string owned by the process, valid for its whole lifetime.
    unsafe {
        let ptr = GetCommandLineW();
        if ptr.is_null() {
            return String::new();
        }
        let mut len = 0usize;
        while *ptr.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len))
    }
}

/// Returns the raw invocation line of the current process.
///
/// Unix does not preserve the original command line, so it is reconstructed
/// from the argument vector; arguments containing whitespace are re-quoted
/// so the first-token scan and later splitting round-trip correctly.
#[cfg(not(windows))]
pub fn raw_invocation_line() -> String {
    raw_from_args(std::env::args())
}

/// Joins an argument list back into a single command line.
///
/// Arguments containing spaces or tabs (or empty arguments) are wrapped in
/// double quotes; everything else is joined verbatim with single spaces.
/// Embedded double quotes are not escaped: the result serves first-token
/// scanning and logging, never spawning — arguments go to the spawn call
/// as untouched vector entries (see [`crate::cmdline::TargetCommand`]).
pub fn raw_from_args<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();

    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let arg = arg.as_ref();
        if arg.is_empty() || arg.contains(' ') || arg.contains('\t') {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }

    line
}
