// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Switch orchestration: activate, report, refresh.

use crate::Refresher;
use serde::Serialize;
use tswitch_adapters::{NotifyAdapter, ProbeAdapter, StatusSink, SwitchAdapter};
use tswitch_core::{Clock, JailId, Severity, StatusSnapshot, SwitchRequest};

/// Title of every switch notification
pub const NOTIFY_TITLE: &str = "Jail switch";

/// What happened on one switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchReport {
    pub jail: JailId,
    pub severity: Severity,
    pub message: String,
    /// Snapshot published by the follow-up refresh. Absent after a hard
    /// failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSnapshot>,
}

impl SwitchReport {
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub struct Switcher<W, N> {
    switch: W,
    notifier: N,
}

impl<W: SwitchAdapter, N: NotifyAdapter> Switcher<W, N> {
    pub fn new(switch: W, notifier: N) -> Self {
        Self { switch, notifier }
    }

    /// Activate `jail`, notify the user and refresh the display unless the
    /// switch failed outright.
    pub async fn switch<P, S, C>(
        &self,
        jail: &JailId,
        refresher: &Refresher<P, S, C>,
    ) -> SwitchReport
    where
        P: ProbeAdapter,
        S: StatusSink,
        C: Clock,
    {
        let request = SwitchRequest::new(jail.clone());
        let (severity, message) = match self.switch.switch_to(jail).await {
            Ok(outcome) => (outcome.severity(), outcome.message(&request.acknowledgement())),
            Err(e) => (Severity::Error, e.to_string()),
        };

        if let Err(e) = self.notifier.notify(severity, NOTIFY_TITLE, &message).await {
            tracing::warn!(error = %e, "switch notification failed");
        }

        let status = if severity == Severity::Error {
            None
        } else {
            refresher.refresh().await
        };

        SwitchReport {
            jail: jail.clone(),
            severity,
            message,
            status,
        }
    }
}

#[cfg(test)]
#[path = "switcher_tests.rs"]
mod tests;
