// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of supervisor scope listings into active jail ids

use crate::jail::JailId;

/// Token that precedes the jail id in a scope unit name
pub const SCOPE_MARKER: &str = "trimorph-";

/// Token that follows the jail id in a scope unit name
pub const SCOPE_SUFFIX: &str = ".scope";

/// Extract active jail ids from a scope listing.
///
/// Each line is expected to look like `trimorph-<id>.scope loaded active running`.
/// Lines without the marker, without a `.scope` delimiter after it, or with an
/// empty id are skipped. Order follows the input lines.
pub fn parse_active_scopes(output: &str) -> Vec<JailId> {
    output.lines().filter_map(parse_scope_line).collect()
}

fn parse_scope_line(line: &str) -> Option<JailId> {
    let start = line.find(SCOPE_MARKER)? + SCOPE_MARKER.len();
    let rest = &line[start..];
    let end = rest.find(SCOPE_SUFFIX)?;
    let id = rest[..end].trim();
    if id.is_empty() {
        return None;
    }
    Some(JailId::new(id))
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
