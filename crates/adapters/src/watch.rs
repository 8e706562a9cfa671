// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jail directory change subscription

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to watch {}: {source}", .path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Live subscription to the jail directory. Dropping it unsubscribes.
pub struct DirWatcher {
    dir: PathBuf,
    _watcher: RecommendedWatcher,
}

impl DirWatcher {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for DirWatcher {
    fn drop(&mut self) {
        tracing::debug!(dir = %self.dir.display(), "unsubscribing from jail directory");
    }
}

/// Paths in `event` that look like jail configs.
///
/// Only creations, modifications and removals count; access events are
/// ignored.
pub fn relevant_paths(event: &Event, suffix: &str) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return Vec::new(),
    }
    event
        .paths
        .iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix))
        })
        .cloned()
        .collect()
}

/// Subscribe to config changes under `dir`, sending each changed path to `tx`.
///
/// Sends never block; when the channel is full a refresh is already pending
/// and the path is dropped.
pub fn watch_jail_dir(
    dir: &Path,
    suffix: &str,
    tx: mpsc::Sender<PathBuf>,
) -> Result<DirWatcher, WatchError> {
    let suffix = suffix.to_string();
    let subscribe_err = |source| WatchError::Subscribe {
        path: dir.to_path_buf(),
        source,
    };

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        match res {
            Ok(event) => {
                for path in relevant_paths(&event, &suffix) {
                    let _ = tx.try_send(path);
                }
            }
            Err(e) => tracing::warn!(error = %e, "jail directory watch error"),
        }
    })
    .map_err(subscribe_err)?;

    watcher
        .watch(dir, RecursiveMode::Recursive)
        .map_err(subscribe_err)?;

    tracing::debug!(dir = %dir.display(), "watching jail directory");
    Ok(DirWatcher {
        dir: dir.to_path_buf(),
        _watcher: watcher,
    })
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
