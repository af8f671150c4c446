//! Log lines for the daemon.
//! Everything goes to stderr; colors are only emitted when stderr is a terminal
//! so that journald / redirected output stays plain.

use std::fmt;
use std::io::{IsTerminal, Write, stderr};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Build a single log line: `[level] message`, optionally colored.
pub fn format_line(level: &str, color: &str, msg: &str, colored: bool) -> String {
    if colored {
        format!("{BOLD}[{color}{level}{RESET}{BOLD}]{RESET} {msg}")
    } else {
        format!("[{level}] {msg}")
    }
}

fn emit(level: &str, color: &str, msg: impl fmt::Display) {
    let err = stderr();
    let colored = err.is_terminal();
    let line = format_line(level, color, &msg.to_string(), colored);
    // A closed stderr is not worth crashing the loop for.
    let _ = writeln!(err.lock(), "{line}");
}

pub fn info<T: fmt::Display>(msg: T) {
    emit("info", FG_BLUE, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit("info", FG_GREEN, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit("warn", FG_YELLOW, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit("error", FG_RED, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_has_bracketed_level() {
        assert_eq!(format_line("info", FG_GREEN, "hello", false), "[info] hello");
    }

    #[test]
    fn colored_line_wraps_level_only() {
        let line = format_line("error", FG_RED, "boom", true);
        assert!(line.starts_with(BOLD));
        assert!(line.contains("\x1b[31merror"));
        assert!(line.ends_with("]\x1b[0m boom"));
    }
}
