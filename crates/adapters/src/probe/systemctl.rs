// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scope probe backed by `systemctl list-units`

use super::{ProbeAdapter, ProbeError};
use crate::subprocess::{lossy, run_with_timeout};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tswitch_core::SCOPE_MARKER;

/// Lists active `trimorph-*` scopes through the service supervisor
#[derive(Debug, Clone)]
pub struct SystemctlProbe {
    program: String,
    timeout: Duration,
}

impl Default for SystemctlProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemctlProbe {
    /// Program and timeout from the environment
    pub fn new() -> Self {
        Self {
            program: crate::env::systemctl_bin(),
            timeout: crate::env::probe_timeout(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the supervisor CLI
    pub fn args() -> Vec<String> {
        [
            "list-units",
            "--type=scope",
            "--state=active",
            "--no-legend",
            "--plain",
            "--no-pager",
        ]
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(format!("{SCOPE_MARKER}*")))
        .collect()
    }
}

#[async_trait]
impl ProbeAdapter for SystemctlProbe {
    async fn list_scopes(&self) -> Result<String, ProbeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::args()).stdin(Stdio::null());

        let output = run_with_timeout(cmd, self.timeout, "scope probe")
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            return Err(ProbeError::Exited {
                code: output.status.code(),
                stderr: lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(lossy(&output.stdout))
    }
}

#[cfg(test)]
#[path = "systemctl_tests.rs"]
mod tests;
