// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single refresh action: probe, render, publish, write sinks.

use tswitch_adapters::{probe_active, ProbeAdapter, StatusSink};
use tswitch_core::{Clock, Generation, StatusSlot, StatusSnapshot};

/// Owns the status slot and is its only writer.
///
/// Cloning shares the slot, so concurrent refreshes from spawned tasks are
/// ordered by generation.
#[derive(Clone)]
pub struct Refresher<P, S, C> {
    probe: P,
    sink: S,
    clock: C,
    slot: StatusSlot,
}

impl<P, S, C> Refresher<P, S, C>
where
    P: ProbeAdapter,
    S: StatusSink,
    C: Clock,
{
    pub fn new(probe: P, sink: S, clock: C) -> Self {
        Self {
            probe,
            sink,
            clock,
            slot: StatusSlot::new(),
        }
    }

    pub fn slot(&self) -> &StatusSlot {
        &self.slot
    }

    /// Probe the supervisor and publish the result.
    ///
    /// Returns the published snapshot, or `None` when a newer refresh
    /// finished first and this result was discarded. Sink failures are
    /// logged; the slot is updated regardless.
    pub async fn refresh(&self) -> Option<StatusSnapshot> {
        let generation = self.reserve().await;
        let active = probe_active(&self.probe).await;
        let snapshot = StatusSnapshot::new(generation, active, self.clock.epoch_ms());

        if !self.slot.publish(snapshot.clone()) {
            tracing::debug!(%generation, "discarding stale refresh");
            return None;
        }
        tracing::debug!(
            %generation,
            label = %snapshot.display.label,
            "status published"
        );
        self.write(snapshot.clone()).await;
        Some(snapshot)
    }

    /// Take a generation newer than anything the sink has seen from any writer
    async fn reserve(&self) -> Generation {
        let sink = self.sink.clone();
        let slot = self.slot.clone();
        let reserved =
            tokio::task::spawn_blocking(move || sink.reserve(|last| slot.begin_after(last))).await;

        let error = match reserved {
            Ok(Ok(generation)) => return generation,
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        tracing::warn!(%error, "status sink reservation failed");
        self.slot.begin()
    }

    async fn write(&self, snapshot: StatusSnapshot) {
        let sink = self.sink.clone();
        let generation = snapshot.generation;
        match tokio::task::spawn_blocking(move || sink.write(&snapshot)).await {
            Ok(Ok(true)) => {}
            Ok(Ok(false)) => tracing::debug!(%generation, "status sink already holds a newer snapshot"),
            Ok(Err(e)) => tracing::warn!(error = %e, %generation, "status sink write failed"),
            Err(e) => tracing::warn!(error = %e, %generation, "status sink write task failed"),
        }
    }
}

#[cfg(test)]
#[path = "refresher_tests.rs"]
mod tests;
