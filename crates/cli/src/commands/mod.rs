// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand handlers

pub mod list;
pub mod status;
pub mod switch;

use std::path::PathBuf;

use tswitch_daemon::{env, Config, LifecycleError};

use crate::output::OutputFormat;

/// Resolved settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct Context {
    pub jails_dir: PathBuf,
    pub jail_suffix: String,
    pub format: OutputFormat,
    pub desktop: bool,
    /// `None` when no state directory could be resolved
    state: Option<Config>,
}

impl Context {
    pub fn new(
        state: Option<Config>,
        jails_dir: Option<PathBuf>,
        format: OutputFormat,
        desktop: bool,
    ) -> Self {
        let jails_dir = jails_dir
            .or_else(|| state.as_ref().map(|c| c.jails_dir.clone()))
            .unwrap_or_else(env::jails_dir);
        let jail_suffix = state
            .as_ref()
            .map(|c| c.jail_suffix.clone())
            .unwrap_or_else(env::jail_suffix);
        let state = state.map(|mut config| {
            config.jails_dir = jails_dir.clone();
            config
        });
        Self {
            jails_dir,
            jail_suffix,
            format,
            desktop,
            state,
        }
    }

    /// The daemon's layout, so both publish to one status file.
    ///
    /// Only commands that read or publish status need it; listing jails works
    /// without a state directory.
    pub fn config(&self) -> Result<&Config, LifecycleError> {
        self.state.as_ref().ok_or(LifecycleError::NoStateDir)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
