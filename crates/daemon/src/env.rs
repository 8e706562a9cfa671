// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::LifecycleError;
use tswitch_core::DEFAULT_JAIL_SUFFIX;

/// Jail config directory used when `TSWITCH_JAILS_DIR` is unset
pub const DEFAULT_JAILS_DIR: &str = "/etc/trimorph/jails.d";

/// Status refresh period used when `TSWITCH_POLL_MS` is unset
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

/// Resolve state directory: TSWITCH_STATE_DIR > XDG_STATE_HOME/tswitch > ~/.local/state/tswitch
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = non_empty("TSWITCH_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("tswitch"));
    }
    let home = non_empty("HOME").ok_or(LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/tswitch"))
}

pub fn jails_dir() -> PathBuf {
    non_empty("TSWITCH_JAILS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_JAILS_DIR))
}

pub fn jail_suffix() -> String {
    non_empty("TSWITCH_JAIL_SUFFIX").unwrap_or_else(|| DEFAULT_JAIL_SUFFIX.to_string())
}

/// Refresh period; zero and unparsable values fall back to the default
pub fn poll_interval() -> Duration {
    non_empty("TSWITCH_POLL_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
