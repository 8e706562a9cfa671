// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status sinks: where published snapshots are written

mod file;

pub use file::{read_status_file, FileStatusSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeStatusSink;

use thiserror::Error;
use tswitch_core::{Generation, StatusSnapshot};

/// Errors from writing or reading a status snapshot
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("status file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("status file encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Destination of published snapshots.
///
/// A sink may be shared by several processes (the daemon and every CLI run
/// write the same status file), so it is also the authority on generations:
/// [`reserve`](Self::reserve) hands out numbers newer than any writer has
/// used, and [`write`](Self::write) refuses a snapshot older than the one it
/// holds. Both may block on I/O; call them off the async worker threads.
pub trait StatusSink: Clone + Send + Sync + 'static {
    /// Issue the generation for a refresh that is about to probe.
    ///
    /// `issue` receives the last generation this sink has recorded and
    /// returns the new one, which is recorded before this returns.
    fn reserve(
        &self,
        issue: impl FnOnce(Generation) -> Generation,
    ) -> Result<Generation, SinkError> {
        Ok(issue(Generation(0)))
    }

    /// Store `snapshot`. Returns `false` when the sink already holds the same
    /// or a newer generation and the snapshot was dropped.
    fn write(&self, snapshot: &StatusSnapshot) -> Result<bool, SinkError>;
}
