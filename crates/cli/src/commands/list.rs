// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tswitch list`

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tswitch_adapters::{list_jails, probe_active, SystemctlProbe, TracedProbe};
use tswitch_core::{JailConfig, JailId};

use super::Context;
use crate::color;
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JailEntry {
    pub id: JailId,
    pub path: PathBuf,
    pub active: bool,
}

/// Pair each configured jail with whether its scope is running
pub fn entries(jails: Vec<JailConfig>, active: &[JailId]) -> Vec<JailEntry> {
    jails
        .into_iter()
        .map(|jail| JailEntry {
            active: active.contains(&jail.id),
            id: jail.id,
            path: jail.path,
        })
        .collect()
}

/// One text line per jail; active jails carry a `*` marker
pub fn format_entry(entry: &JailEntry) -> String {
    if entry.active {
        format!("* {}", color::active(entry.id.as_str()))
    } else {
        format!("  {}", entry.id)
    }
}

pub async fn handle(ctx: &Context) -> Result<()> {
    let jails = list_jails(&ctx.jails_dir, &ctx.jail_suffix)?;
    let active = if jails.is_empty() {
        Vec::new()
    } else {
        probe_active(&TracedProbe::new(SystemctlProbe::new())).await
    };
    let entries = entries(jails, &active);

    match ctx.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No jails configured in {}", ctx.jails_dir.display());
            }
            for entry in &entries {
                println!("{}", format_entry(entry));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
