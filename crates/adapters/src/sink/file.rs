// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON status file written atomically (temp file + rename)
//!
//! Writers coordinate through an exclusive lock on `<status>.lock`, which
//! also records the last generation any process reserved.

use super::{SinkError, StatusSink};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tswitch_core::{Generation, StatusSnapshot};

/// Writes each snapshot to `path` as pretty JSON
#[derive(Debug, Clone)]
pub struct FileStatusSink {
    path: PathBuf,
}

impl FileStatusSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "status.json".into());
        name.push(ext);
        self.path.with_file_name(name)
    }

    /// Run `f` holding the writers' lock; the lock file is handed to `f`
    fn locked<T>(
        &self,
        f: impl FnOnce(&mut File) -> Result<T, SinkError>,
    ) -> Result<T, SinkError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut lock = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.sibling(".lock"))?;
        // Released when `lock` is closed
        lock.lock_exclusive()?;
        f(&mut lock)
    }

    /// Generation of the snapshot on disk; unreadable files count as none
    fn on_disk_generation(&self) -> Generation {
        match read_status_file(&self.path) {
            Ok(Some(snapshot)) => snapshot.generation,
            Ok(None) => Generation(0),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable status file");
                Generation(0)
            }
        }
    }

    fn replace(&self, snapshot: &StatusSnapshot) -> Result<(), SinkError> {
        let tmp = self.sibling(".tmp");
        let mut file = File::create(&tmp)?;
        serde_json::to_writer_pretty(&mut file, snapshot)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn read_counter(lock: &mut File) -> Result<Generation, SinkError> {
    let mut text = String::new();
    lock.seek(SeekFrom::Start(0))?;
    lock.read_to_string(&mut text)?;
    Ok(Generation(text.trim().parse().unwrap_or(0)))
}

fn write_counter(lock: &mut File, generation: Generation) -> Result<(), SinkError> {
    lock.set_len(0)?;
    lock.seek(SeekFrom::Start(0))?;
    writeln!(lock, "{generation}")?;
    Ok(())
}

impl StatusSink for FileStatusSink {
    fn reserve(
        &self,
        issue: impl FnOnce(Generation) -> Generation,
    ) -> Result<Generation, SinkError> {
        self.locked(|lock| {
            let last = read_counter(lock)?.max(self.on_disk_generation());
            let generation = issue(last);
            write_counter(lock, generation)?;
            Ok(generation)
        })
    }

    fn write(&self, snapshot: &StatusSnapshot) -> Result<bool, SinkError> {
        self.locked(|_| {
            let current = self.on_disk_generation();
            if current >= snapshot.generation {
                tracing::debug!(
                    path = %self.path.display(),
                    %current,
                    offered = %snapshot.generation,
                    "status file already newer"
                );
                return Ok(false);
            }

            self.replace(snapshot)?;
            tracing::debug!(
                path = %self.path.display(),
                generation = %snapshot.generation,
                "status written"
            );
            Ok(true)
        })
    }
}

/// Read the last written snapshot. A missing file is `Ok(None)`.
pub fn read_status_file(path: &Path) -> Result<Option<StatusSnapshot>, SinkError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_slice(&bytes)?))
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
