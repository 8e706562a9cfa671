// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

pub mod codes {
    /// Active jail marker: green
    pub const ACTIVE: &str = "\x1b[32m";
    /// Secondary text: darker grey
    pub const MUTED: &str = "\x1b[38;5;240m";
    pub const RESET: &str = "\x1b[0m";
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: &str, text: &str) -> String {
    if should_colorize() {
        format!("{code}{text}{}", codes::RESET)
    } else {
        text.to_string()
    }
}

pub fn active(text: &str) -> String {
    paint(codes::ACTIVE, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
