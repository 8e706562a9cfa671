// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::probe::{ProbeAdapter, ProbeError};
use crate::switch::SwitchAdapter;
use async_trait::async_trait;
use tswitch_core::{JailId, SwitchError, SwitchOutcome};
use tracing::Instrument;

/// Wrapper that adds tracing to any SwitchAdapter
#[derive(Clone)]
pub struct TracedSwitch<S> {
    inner: S,
}

impl<S> TracedSwitch<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SwitchAdapter> SwitchAdapter for TracedSwitch<S> {
    async fn switch_to(&self, jail: &JailId) -> Result<SwitchOutcome, SwitchError> {
        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.switch_to(jail).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(SwitchOutcome::Switched { .. }) => tracing::info!(elapsed_ms, "switched"),
                Ok(SwitchOutcome::Warned { stderr, .. }) => {
                    tracing::warn!(elapsed_ms, stderr = %stderr, "switched with diagnostics")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "switch failed"),
            }
            result
        }
        .instrument(tracing::info_span!("jail.switch", %jail))
        .await
    }
}

/// Wrapper that adds tracing to any ProbeAdapter
#[derive(Clone)]
pub struct TracedProbe<P> {
    inner: P,
}

impl<P> TracedProbe<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: ProbeAdapter> ProbeAdapter for TracedProbe<P> {
    async fn list_scopes(&self) -> Result<String, ProbeError> {
        let start = std::time::Instant::now();
        let result = self.inner.list_scopes().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info_span!("scope.probe").in_scope(|| match &result {
            Ok(output) => tracing::trace!(elapsed_ms, lines = output.lines().count(), "probed"),
            Err(e) => tracing::debug!(elapsed_ms, error = %e, "probe failed"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
