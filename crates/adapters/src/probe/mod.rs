// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-scope probe adapters

mod systemctl;

pub use systemctl::SystemctlProbe;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProbe;

use async_trait::async_trait;
use thiserror::Error;
use tswitch_core::{parse_active_scopes, JailId};

/// Errors from listing active scopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("{0}")]
    Spawn(String),
    #[error("scope listing exited with code {code:?}: {stderr}")]
    Exited { code: Option<i32>, stderr: String },
}

/// Adapter that lists the active scope units
#[async_trait]
pub trait ProbeAdapter: Clone + Send + Sync + 'static {
    /// Raw unit listing, one unit per line
    async fn list_scopes(&self) -> Result<String, ProbeError>;
}

/// Identify the active jails.
///
/// Never fails: a probe error is logged and reported as "no active jail".
pub async fn probe_active<P: ProbeAdapter>(probe: &P) -> Vec<JailId> {
    match probe.list_scopes().await {
        Ok(output) => parse_active_scopes(&output),
        Err(e) => {
            tracing::warn!(error = %e, "scope probe failed, treating as no active jail");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
