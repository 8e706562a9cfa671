// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Switch requests and the three-way classification of their result.
//!
//! A switch is a hard failure when the tool could not run or exited
//! non-zero. A zero exit with diagnostic output is a soft warning: the switch
//! took effect and the display is refreshed. A zero exit with a quiet stderr
//! is a clean success.

use crate::jail::JailId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Program appended after the jail id to acknowledge the switch
pub const ACK_PROGRAM: &str = "echo";

/// How loudly an outcome is reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// A request to activate one jail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRequest {
    pub jail: JailId,
}

impl SwitchRequest {
    pub fn new(jail: JailId) -> Self {
        Self { jail }
    }

    /// Text echoed by the acknowledgement command
    pub fn acknowledgement(&self) -> String {
        format!("Switched to {}", self.jail)
    }

    /// Arguments for the activation tool: `<jail> echo "Switched to <jail>"`
    pub fn args(&self) -> Vec<String> {
        vec![
            self.jail.to_string(),
            ACK_PROGRAM.to_string(),
            self.acknowledgement(),
        ]
    }
}

/// A switch that took effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Zero exit, nothing on stderr
    Switched { stdout: String },
    /// Zero exit, but the tool printed diagnostics
    Warned { stdout: String, stderr: String },
}

impl SwitchOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            SwitchOutcome::Switched { .. } => Severity::Info,
            SwitchOutcome::Warned { .. } => Severity::Warning,
        }
    }

    /// User-facing message; falls back to `fallback` when stdout is empty
    pub fn message(&self, fallback: &str) -> String {
        match self {
            SwitchOutcome::Switched { stdout } => non_empty_or(stdout, fallback),
            SwitchOutcome::Warned { stdout, stderr } => {
                format!("{} ({})", non_empty_or(stdout, fallback), stderr)
            }
        }
    }
}

fn non_empty_or(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// A switch that did not take effect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwitchError {
    #[error("failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("{program} exited with {}: {}", exit_label(.code), diagnostic_or_default(.stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

fn diagnostic_or_default(stderr: &str) -> &str {
    if stderr.is_empty() {
        "no diagnostic output"
    } else {
        stderr
    }
}

/// Classify a finished activation process.
///
/// `code` is `None` when the process was killed by a signal. Output is
/// trimmed before inspection; whitespace-only stderr counts as empty.
pub fn classify(
    program: &str,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<SwitchOutcome, SwitchError> {
    let stdout = stdout.trim().to_string();
    let stderr = stderr.trim().to_string();

    if code != Some(0) {
        return Err(SwitchError::Failed {
            program: program.to_string(),
            code,
            stderr,
        });
    }

    if stderr.is_empty() {
        Ok(SwitchOutcome::Switched { stdout })
    } else {
        Ok(SwitchOutcome::Warned { stdout, stderr })
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
