// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activation through the `trimorph-solo` tool.
//!
//! The tool is invoked as `trimorph-solo <jail> echo "Switched to <jail>"`
//! with a closed stdin. It is not time-limited: activation may legitimately
//! take a while.

use super::SwitchAdapter;
use crate::subprocess::lossy;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tswitch_core::{classify, JailId, SwitchError, SwitchOutcome, SwitchRequest};

#[derive(Debug, Clone)]
pub struct SoloSwitchAdapter {
    program: String,
}

impl Default for SoloSwitchAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SoloSwitchAdapter {
    pub fn new() -> Self {
        Self {
            program: crate::env::solo_bin(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl SwitchAdapter for SoloSwitchAdapter {
    async fn switch_to(&self, jail: &JailId) -> Result<SwitchOutcome, SwitchError> {
        let request = SwitchRequest::new(jail.clone());
        let output = Command::new(&self.program)
            .args(request.args())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| SwitchError::Spawn {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        classify(
            &self.program,
            output.status.code(),
            &lossy(&output.stdout),
            &lossy(&output.stderr),
        )
    }
}

#[cfg(test)]
#[path = "solo_tests.rs"]
mod tests;
