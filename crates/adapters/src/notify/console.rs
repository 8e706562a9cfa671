// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal notification adapter.
//!
//! Info goes to stdout as-is. Warnings and errors go to stderr with a
//! severity prefix.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::io::Write;
use tswitch_core::Severity;

/// Output stream a console notification is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifyAdapter;

impl ConsoleNotifyAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Where and how a notification is printed
    pub fn format_line(severity: Severity, message: &str) -> (Stream, String) {
        match severity {
            Severity::Info => (Stream::Stdout, message.to_string()),
            Severity::Warning | Severity::Error => (Stream::Stderr, format!("{severity}: {message}")),
        }
    }
}

#[async_trait]
impl NotifyAdapter for ConsoleNotifyAdapter {
    async fn notify(
        &self,
        severity: Severity,
        _title: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let (stream, line) = Self::format_line(severity, message);
        let result = match stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{line}"),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{line}"),
        };
        result.map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
