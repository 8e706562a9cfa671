// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable age of a status snapshot.

/// Format the age of a timestamp relative to `now_ms`: `"just now"`,
/// `"42s ago"`, `"3m ago"`, `"2h5m ago"`, `"4d ago"`.
///
/// Timestamps in the future (clock skew between writer and reader) read as
/// `"just now"`.
pub fn format_age(now_ms: u64, then_ms: u64) -> String {
    let secs = now_ms.saturating_sub(then_ms) / 1000;
    match secs {
        0 => "just now".to_string(),
        1..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86399 => match (secs % 3600) / 60 {
            0 => format!("{}h ago", secs / 3600),
            m => format!("{}h{m}m ago", secs / 3600),
        },
        _ => format!("{}d ago", secs / 86400),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
