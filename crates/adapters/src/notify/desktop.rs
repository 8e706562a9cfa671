// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.
//!
//! On macOS the first notification would otherwise run an AppleScript lookup
//! of the bundle identifier, which blocks forever in a process without
//! Automation permissions. The identifier is set up front instead.
//!
//! `notify` returns only once the notification has been handed to the
//! notification server, so a CLI that exits right after a failed switch
//! still delivers it.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use notify_rust::Notification;
use tswitch_core::Severity;

/// Hands a built notification to the notification server
type Deliver = fn(&Notification) -> Result<(), String>;

fn show(notification: &Notification) -> Result<(), String> {
    notification.show().map(|_| ()).map_err(|e| e.to_string())
}

#[derive(Clone, Copy, Debug)]
pub struct DesktopNotifyAdapter {
    deliver: Deliver,
}

impl Default for DesktopNotifyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self { deliver: show }
    }

    #[cfg(test)]
    fn with_delivery(deliver: Deliver) -> Self {
        Self { deliver }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn urgency(severity: Severity) -> notify_rust::Urgency {
    match severity {
        Severity::Info => notify_rust::Urgency::Low,
        Severity::Warning => notify_rust::Urgency::Normal,
        Severity::Error => notify_rust::Urgency::Critical,
    }
}

fn build(severity: Severity, title: &str, message: &str) -> Notification {
    let mut notification = Notification::new();
    notification.summary(title).body(message);
    #[cfg(all(unix, not(target_os = "macos")))]
    notification.urgency(urgency(severity));
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    let _ = severity;
    notification
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(
        &self,
        severity: Severity,
        title: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let notification = build(severity, title, message);
        let deliver = self.deliver;
        // show() is synchronous D-Bus/AppKit I/O
        let delivered = tokio::task::spawn_blocking(move || deliver(&notification))
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        match delivered {
            Ok(()) => {
                tracing::debug!(%title, %severity, "desktop notification sent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%title, error = %e, "desktop notification failed");
                Err(NotifyError::SendFailed(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
