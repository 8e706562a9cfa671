// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake scope probe for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProbeAdapter, ProbeError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

struct Scripted {
    result: Result<String, ProbeError>,
    delay: Duration,
}

struct FakeProbeState {
    default: Result<String, ProbeError>,
    queued: VecDeque<Scripted>,
    calls: usize,
}

/// Fake probe returning scripted listings
#[derive(Clone)]
pub struct FakeProbe {
    inner: Arc<Mutex<FakeProbeState>>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProbeState {
                default: Ok(String::new()),
                queued: VecDeque::new(),
                calls: 0,
            })),
        }
    }
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe reporting these jails as active scopes
    pub fn with_active(jails: &[&str]) -> Self {
        let probe = Self::new();
        probe.set_active(jails);
        probe
    }

    /// Listing returned when nothing is queued
    pub fn set_output(&self, output: impl Into<String>) {
        self.inner.lock().default = Ok(output.into());
    }

    /// Set the default listing to one running scope per jail
    pub fn set_active(&self, jails: &[&str]) {
        self.set_output(listing(jails));
    }

    /// Make unqueued calls fail
    pub fn fail(&self, error: ProbeError) {
        self.inner.lock().default = Err(error);
    }

    /// Queue a one-shot listing that resolves after `delay`
    pub fn push_active(&self, jails: &[&str], delay: Duration) {
        self.inner.lock().queued.push_back(Scripted {
            result: Ok(listing(jails)),
            delay,
        });
    }

    /// Number of probes performed
    pub fn calls(&self) -> usize {
        self.inner.lock().calls
    }
}

/// Build a unit listing in the supervisor's plain format
fn listing(jails: &[&str]) -> String {
    jails
        .iter()
        .map(|j| format!("trimorph-{j}.scope loaded active running Jail {j}\n"))
        .collect()
}

#[async_trait]
impl ProbeAdapter for FakeProbe {
    async fn list_scopes(&self) -> Result<String, ProbeError> {
        let (result, delay) = {
            let mut state = self.inner.lock();
            state.calls += 1;
            match state.queued.pop_front() {
                Some(scripted) => (scripted.result, scripted.delay),
                None => (state.default.clone(), Duration::ZERO),
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
