// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake status sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SinkError, StatusSink};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tswitch_core::{Generation, StatusSnapshot};

#[derive(Default)]
struct FakeSinkState {
    written: Vec<StatusSnapshot>,
    issued: Generation,
    fail: bool,
    delay: Duration,
}

/// Records every snapshot it accepts.
///
/// Like the status file, it refuses snapshots that are not newer than the
/// last one written.
#[derive(Clone, Default)]
pub struct FakeStatusSink {
    inner: Arc<Mutex<FakeSinkState>>,
}

impl FakeStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail
    pub fn set_failing(&self, fail: bool) {
        self.inner.lock().fail = fail;
    }

    /// Block each write for `delay` before storing it
    pub fn set_write_delay(&self, delay: Duration) {
        self.inner.lock().delay = delay;
    }

    /// Pretend another process already reserved up to `generation`
    pub fn set_issued(&self, generation: Generation) {
        self.inner.lock().issued = generation;
    }

    /// Snapshots written so far, in order
    pub fn written(&self) -> Vec<StatusSnapshot> {
        self.inner.lock().written.clone()
    }

    pub fn last(&self) -> Option<StatusSnapshot> {
        self.inner.lock().written.last().cloned()
    }
}

impl StatusSink for FakeStatusSink {
    fn reserve(
        &self,
        issue: impl FnOnce(Generation) -> Generation,
    ) -> Result<Generation, SinkError> {
        let mut state = self.inner.lock();
        let generation = issue(state.issued);
        state.issued = generation;
        Ok(generation)
    }

    fn write(&self, snapshot: &StatusSnapshot) -> Result<bool, SinkError> {
        let delay = self.inner.lock().delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let mut state = self.inner.lock();
        if state.fail {
            return Err(SinkError::Io(std::io::Error::other("sink unavailable")));
        }
        if state
            .written
            .last()
            .is_some_and(|last| last.generation >= snapshot.generation)
        {
            return Ok(false);
        }
        state.written.push(snapshot.clone());
        Ok(true)
    }
}
