// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output for the `netless` binary.
//!
//! Colors are applied only when stderr is a terminal.

use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Error,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
        }
    }

    /// ANSI color code
    fn color(self) -> u8 {
        match self {
            Level::Error => 31,
            Level::Warning => 33,
        }
    }
}

/// Print an error message to stderr (red on a terminal).
pub fn print_error(msg: impl std::fmt::Display) {
    print(Level::Error, msg);
}

/// Print a warning message to stderr (yellow on a terminal).
pub fn print_warning(msg: impl std::fmt::Display) {
    print(Level::Warning, msg);
}

fn print(level: Level, msg: impl std::fmt::Display) {
    let mut stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    write_diagnostic(&mut stderr, level, msg, is_tty);
}

fn write_diagnostic<W: Write>(
    writer: &mut W,
    level: Level,
    msg: impl std::fmt::Display,
    is_terminal: bool,
) {
    if is_terminal {
        let _ = writeln!(
            writer,
            "\x1b[{}m{}: {}\x1b[0m",
            level.color(),
            level.label(),
            msg
        );
    } else {
        let _ = writeln!(writer, "{}: {}", level.label(), msg);
    }
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
