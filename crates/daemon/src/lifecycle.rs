// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fs2::FileExt;
use thiserror::Error;
use tracing::{info, warn};
use tswitch_adapters::{FileStatusSink, SystemctlProbe, TracedProbe};
use tswitch_core::SystemClock;
use tswitch_engine::Refresher;

use crate::env;
use crate::watch_loop::{WatchSettings, WATCH_RETRY_INTERVAL};

/// Status file name under the state directory
pub const STATUS_FILE: &str = "status.json";

/// Refresher with the production adapters
pub type DaemonRefresher = Refresher<TracedProbe<SystemctlProbe>, FileStatusSink, SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/tswitch)
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the published status snapshot
    pub status_path: PathBuf,
    pub jails_dir: PathBuf,
    pub jail_suffix: String,
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let mut config = Self::for_state_dir(env::state_dir()?);
        config.jails_dir = env::jails_dir();
        config.jail_suffix = env::jail_suffix();
        config.poll_interval = env::poll_interval();
        Ok(config)
    }

    /// Default layout rooted at `state_dir`
    pub fn for_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            status_path: state_dir.join(STATUS_FILE),
            jails_dir: PathBuf::from(env::DEFAULT_JAILS_DIR),
            jail_suffix: tswitch_core::DEFAULT_JAIL_SUFFIX.to_string(),
            poll_interval: env::DEFAULT_POLL_INTERVAL,
            state_dir,
        }
    }

    pub fn watch_settings(&self) -> WatchSettings {
        WatchSettings {
            jails_dir: self.jails_dir.clone(),
            suffix: self.jail_suffix.clone(),
            poll_interval: self.poll_interval,
            watch_retry: WATCH_RETRY_INTERVAL,
        }
    }

    /// Refresher writing to this configuration's status file
    pub fn refresher(&self) -> DaemonRefresher {
        Refresher::new(
            TracedProbe::new(SystemctlProbe::new()),
            FileStatusSink::new(&self.status_path),
            SystemClock,
        )
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Daemon state during operation
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    lock_file: File,
    pub refresher: DaemonRefresher,
}

/// Acquire the PID lock and build the production refresher.
///
/// Fails with [`LifecycleError::LockFailed`] when another daemon holds the
/// lock; its files are left untouched.
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;

    // Open without truncating so a running daemon's PID survives a failed attempt
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    info!(
        state_dir = %config.state_dir.display(),
        jails_dir = %config.jails_dir.display(),
        poll_ms = config.poll_interval.as_millis() as u64,
        "daemon started"
    );

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        refresher: config.refresher(),
    })
}

/// PID recorded in a lock file, if readable
pub fn read_pid(lock_path: &Path) -> Option<u32> {
    std::fs::read_to_string(lock_path).ok()?.trim().parse().ok()
}

impl DaemonState {
    /// Release the lock and remove the PID file. The status file is kept so
    /// `tswitch status --cached` still shows the last known state.
    pub fn shutdown(self) {
        info!("Shutting down daemon...");
        if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
            warn!(error = %e, "failed to remove pid file");
        }
        drop(self.lock_file);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
