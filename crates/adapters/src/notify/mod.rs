// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification adapters

mod console;
mod desktop;
mod noop;
mod tee;

pub use console::ConsoleNotifyAdapter;
pub use desktop::DesktopNotifyAdapter;
pub use noop::NoOpNotifyAdapter;
pub use tee::TeeNotifyAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use thiserror::Error;
use tswitch_core::Severity;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Adapter for telling the user how a switch went
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Send a notification with a title and message body
    async fn notify(
        &self,
        severity: Severity,
        title: &str,
        message: &str,
    ) -> Result<(), NotifyError>;
}
