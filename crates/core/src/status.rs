// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status rendering and the owned display slot.
//!
//! [`render`] turns a probe result into the label/tooltip pair shown to the
//! user. [`StatusSlot`] holds the most recently published snapshot and hands
//! out generation numbers so that a refresh which finishes late can never
//! overwrite a newer result.

use crate::jail::JailId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Command a user runs to change the active jail (the indicator's click target)
pub const SWITCH_COMMAND: &str = "tswitch switch";

/// Label and tooltip for the status indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDisplay {
    pub label: String,
    pub tooltip: String,
    pub command: String,
}

/// Render the indicator for a probe result.
///
/// Only the first active jail is shown.
pub fn render(active: &[JailId]) -> StatusDisplay {
    let (label, tooltip) = match active.first() {
        Some(jail) => (
            format!("jail: {jail}"),
            format!("Active trimorph jail: {jail}"),
        ),
        None => (
            "jail: none".to_string(),
            "No trimorph jail is active".to_string(),
        ),
    };
    StatusDisplay {
        label,
        tooltip: format!("{tooltip} (run `{SWITCH_COMMAND}` to change)"),
        command: SWITCH_COMMAND.to_string(),
    }
}

/// Monotonic refresh number issued by [`StatusSlot::begin`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(pub u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One published probe result together with its rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub generation: Generation,
    pub active: Vec<JailId>,
    #[serde(flatten)]
    pub display: StatusDisplay,
    pub updated_at_ms: u64,
}

impl StatusSnapshot {
    pub fn new(generation: Generation, active: Vec<JailId>, updated_at_ms: u64) -> Self {
        let display = render(&active);
        Self {
            generation,
            active,
            display,
            updated_at_ms,
        }
    }
}

#[derive(Default)]
struct SlotState {
    issued: u64,
    current: Option<StatusSnapshot>,
}

/// Single-writer cell holding the displayed status
#[derive(Clone, Default)]
pub struct StatusSlot {
    inner: Arc<Mutex<SlotState>>,
}

impl StatusSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next generation. Call before probing.
    pub fn begin(&self) -> Generation {
        self.begin_after(Generation(0))
    }

    /// Reserve a generation newer than both this slot's last one and `floor`.
    ///
    /// `floor` is the last generation another writer of the same status
    /// file issued.
    pub fn begin_after(&self, floor: Generation) -> Generation {
        let mut state = self.inner.lock();
        state.issued = state.issued.max(floor.0) + 1;
        Generation(state.issued)
    }

    /// Publish `snapshot` unless a snapshot of the same or a newer generation
    /// is already displayed. Returns whether it was accepted.
    pub fn publish(&self, snapshot: StatusSnapshot) -> bool {
        let mut state = self.inner.lock();
        if let Some(current) = &state.current {
            if current.generation >= snapshot.generation {
                return false;
            }
        }
        state.current = Some(snapshot);
        true
    }

    /// The displayed snapshot, if any refresh has completed
    pub fn current(&self) -> Option<StatusSnapshot> {
        self.inner.lock().current.clone()
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
