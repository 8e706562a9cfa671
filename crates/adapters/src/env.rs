// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

/// Jail activation tool (default: `trimorph-solo` from PATH).
pub fn solo_bin() -> String {
    non_empty("TSWITCH_SOLO_BIN").unwrap_or_else(|| "trimorph-solo".to_string())
}

/// Service supervisor CLI (default: `systemctl` from PATH).
pub fn systemctl_bin() -> String {
    non_empty("TSWITCH_SYSTEMCTL_BIN").unwrap_or_else(|| "systemctl".to_string())
}

/// Scope probe timeout (default: 10000ms).
pub fn probe_timeout() -> Duration {
    parse_duration_ms("TSWITCH_PROBE_TIMEOUT_MS").unwrap_or(crate::subprocess::PROBE_TIMEOUT)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
