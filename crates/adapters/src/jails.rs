// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jail directory reader
//!
//! Lists `<dir>/*<suffix>` in directory enumeration order. File contents are
//! never read.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tswitch_core::JailConfig;

/// Errors from listing the jail directory
#[derive(Debug, Error)]
pub enum JailDirError {
    #[error("jail directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read jail directory {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the jails configured in `dir`.
///
/// An existing directory without matching files yields an empty list. The
/// order is whatever the directory enumeration returns.
pub fn list_jails(dir: &Path, suffix: &str) -> Result<Vec<JailConfig>, JailDirError> {
    if !dir.exists() {
        return Err(JailDirError::NotFound(dir.to_path_buf()));
    }

    let read_err = |source| JailDirError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut jails = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        if let Some(jail) = JailConfig::from_path(&entry.path(), suffix) {
            jails.push(jail);
        }
    }

    tracing::debug!(dir = %dir.display(), count = jails.len(), "listed jails");
    Ok(jails)
}

#[cfg(test)]
#[path = "jails_tests.rs"]
mod tests;
