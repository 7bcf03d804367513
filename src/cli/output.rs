//! Output formatting utilities for CLI commands.

use is_terminal::IsTerminal;
use std::io;

/// Progress message to stderr (respects the quiet flag).
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", msg);
    }
}

/// Colorize text with ANSI escape codes (only if stdout is a terminal).
#[must_use]
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
