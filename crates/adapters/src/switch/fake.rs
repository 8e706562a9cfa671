// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake switch adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::SwitchAdapter;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tswitch_core::{JailId, SwitchError, SwitchOutcome};

struct FakeSwitchState {
    results: VecDeque<Result<SwitchOutcome, SwitchError>>,
    calls: Vec<JailId>,
}

/// Fake switch adapter with scripted results.
///
/// Unscripted calls succeed cleanly, echoing the acknowledgement.
#[derive(Clone)]
pub struct FakeSwitchAdapter {
    inner: Arc<Mutex<FakeSwitchState>>,
}

impl Default for FakeSwitchAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeSwitchState {
                results: VecDeque::new(),
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeSwitchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next switch
    pub fn push_result(&self, result: Result<SwitchOutcome, SwitchError>) {
        self.inner.lock().results.push_back(result);
    }

    /// Jails switched to, in call order
    pub fn calls(&self) -> Vec<JailId> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl SwitchAdapter for FakeSwitchAdapter {
    async fn switch_to(&self, jail: &JailId) -> Result<SwitchOutcome, SwitchError> {
        let mut state = self.inner.lock();
        state.calls.push(jail.clone());
        state.results.pop_front().unwrap_or_else(|| {
            Ok(SwitchOutcome::Switched {
                stdout: format!("Switched to {jail}"),
            })
        })
    }
}
