// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jail identity as derived from the jail config directory

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Short name of a trimorph jail, e.g. `web` for `web.conf`.
///
/// Also the `<id>` in the `trimorph-<id>.scope` unit name. Any non-empty
/// string is accepted; `trimorph-solo` decides whether it names a real jail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JailId(String);

impl JailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JailId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<&str> for JailId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// File name suffix that marks a jail config file
pub const DEFAULT_JAIL_SUFFIX: &str = ".conf";

/// A jail config file found in the jail directory.
///
/// Only the file name is interpreted; the contents belong to `trimorph-solo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JailConfig {
    pub id: JailId,
    pub path: PathBuf,
}

impl JailConfig {
    /// Derive a jail from a config file path.
    ///
    /// Returns `None` when the file name does not end with `suffix`, or when
    /// nothing is left once the suffix is removed (a file named just `.conf`).
    pub fn from_path(path: &Path, suffix: &str) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(suffix)?;
        if stem.is_empty() {
            return None;
        }
        Some(Self {
            id: JailId::new(stem),
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[path = "jail_tests.rs"]
mod tests;
