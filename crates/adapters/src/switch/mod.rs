// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jail activation adapters

mod solo;

pub use solo::SoloSwitchAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSwitchAdapter;

use async_trait::async_trait;
use tswitch_core::{JailId, SwitchError, SwitchOutcome};

/// Adapter that makes a jail the active one
#[async_trait]
pub trait SwitchAdapter: Clone + Send + Sync + 'static {
    /// Activate `jail` and classify the result
    async fn switch_to(&self, jail: &JailId) -> Result<SwitchOutcome, SwitchError>;
}
