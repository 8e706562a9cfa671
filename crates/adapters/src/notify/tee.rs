// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan a notification out to two adapters

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use tswitch_core::Severity;

/// Sends to `first`, then `second`. Both are always attempted; the first
/// error is returned.
#[derive(Clone, Debug)]
pub struct TeeNotifyAdapter<A, B> {
    first: A,
    second: B,
}

impl<A, B> TeeNotifyAdapter<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

#[async_trait]
impl<A: NotifyAdapter, B: NotifyAdapter> NotifyAdapter for TeeNotifyAdapter<A, B> {
    async fn notify(
        &self,
        severity: Severity,
        title: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let first = self.first.notify(severity, title, message).await;
        let second = self.second.notify(severity, title, message).await;
        first.and(second)
    }
}

#[cfg(test)]
#[path = "tee_tests.rs"]
mod tests;
