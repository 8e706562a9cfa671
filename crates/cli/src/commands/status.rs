// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tswitch status`

use anyhow::Result;
use clap::Args;
use tswitch_adapters::read_status_file;
use tswitch_core::{format_age, Clock, StatusSnapshot, SystemClock};

use super::Context;
use crate::color;
use crate::output::{print_json, OutputFormat};

#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Show what the daemon last published instead of probing
    #[arg(long)]
    pub cached: bool,
}

/// Label, tooltip and, for cached snapshots, how old the snapshot is
pub fn format_snapshot(snapshot: &StatusSnapshot, age_of: Option<u64>) -> String {
    let mut out = format!("{}\n{}", snapshot.display.label, snapshot.display.tooltip);
    if let Some(now_ms) = age_of {
        let age = format_age(now_ms, snapshot.updated_at_ms);
        out.push('\n');
        out.push_str(&color::muted(&format!("updated {age}")));
    }
    out
}

pub async fn handle(args: StatusArgs, ctx: &Context) -> Result<()> {
    if args.cached {
        return cached(ctx);
    }

    let snapshot = ctx.config()?.refresher().refresh().await;
    match (ctx.format, snapshot) {
        (OutputFormat::Json, snapshot) => print_json(&snapshot)?,
        (OutputFormat::Text, Some(snapshot)) => println!("{}", format_snapshot(&snapshot, None)),
        (OutputFormat::Text, None) => {}
    }
    Ok(())
}

fn cached(ctx: &Context) -> Result<()> {
    let snapshot = read_status_file(&ctx.config()?.status_path)?;
    match (ctx.format, snapshot) {
        (OutputFormat::Json, snapshot) => print_json(&snapshot)?,
        (OutputFormat::Text, Some(snapshot)) => println!(
            "{}",
            format_snapshot(&snapshot, Some(SystemClock.epoch_ms()))
        ),
        (OutputFormat::Text, None) => {
            println!("No status published yet (is tswitchd running?)")
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
