// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tswitch switch [JAIL]`

use std::io::IsTerminal;

use anyhow::{bail, Result};
use clap::Args;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use tswitch_adapters::{
    list_jails, probe_active, ConsoleNotifyAdapter, DesktopNotifyAdapter, NoOpNotifyAdapter,
    NotifyAdapter, SoloSwitchAdapter, SystemctlProbe, TeeNotifyAdapter, TracedProbe,
    TracedSwitch,
};
use tswitch_core::{JailConfig, JailId};
use tswitch_daemon::DaemonRefresher;
use tswitch_engine::{SwitchReport, Switcher};

use super::Context;
use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};

#[derive(Args, Debug, Default)]
pub struct SwitchArgs {
    /// Jail to activate; prompts for one when omitted
    pub jail: Option<String>,
}

/// Preselected prompt row: the first listed jail that is currently active
pub fn default_selection(jails: &[JailConfig], active: &[JailId]) -> usize {
    jails
        .iter()
        .position(|j| active.contains(&j.id))
        .unwrap_or(0)
}

pub async fn handle(args: SwitchArgs, ctx: &Context) -> Result<()> {
    let jail = match args.jail {
        Some(jail) => JailId::new(jail),
        None => match choose(ctx).await? {
            Some(jail) => jail,
            None => return Ok(()),
        },
    };

    let refresher = ctx.config()?.refresher();
    let report = match (ctx.format, ctx.desktop) {
        (OutputFormat::Text, false) => {
            execute(ConsoleNotifyAdapter::new(), &jail, &refresher).await
        }
        (OutputFormat::Text, true) => {
            let tee = TeeNotifyAdapter::new(ConsoleNotifyAdapter::new(), DesktopNotifyAdapter::new());
            execute(tee, &jail, &refresher).await
        }
        (OutputFormat::Json, false) => {
            execute(NoOpNotifyAdapter::new(), &jail, &refresher).await
        }
        (OutputFormat::Json, true) => {
            execute(DesktopNotifyAdapter::new(), &jail, &refresher).await
        }
    };

    if ctx.format == OutputFormat::Json {
        print_json(&report)?;
    }
    if report.is_failure() {
        // Already reported through the notifier or the JSON report
        return Err(ExitError::new(1, String::new()).into());
    }
    Ok(())
}

async fn execute<N: NotifyAdapter>(
    notifier: N,
    jail: &JailId,
    refresher: &DaemonRefresher,
) -> SwitchReport {
    let switcher = Switcher::new(TracedSwitch::new(SoloSwitchAdapter::new()), notifier);
    switcher.switch(jail, refresher).await
}

/// Prompt for a jail. `None` means there was nothing to choose or the user
/// cancelled.
async fn choose(ctx: &Context) -> Result<Option<JailId>> {
    let jails = list_jails(&ctx.jails_dir, &ctx.jail_suffix)?;
    if jails.is_empty() {
        println!("No jails available in {}", ctx.jails_dir.display());
        return Ok(None);
    }
    if !std::io::stdin().is_terminal() {
        bail!("no jail given and stdin is not a terminal; run `tswitch switch <JAIL>`");
    }

    let active = probe_active(&TracedProbe::new(SystemctlProbe::new())).await;
    let items: Vec<&str> = jails.iter().map(|j| j.id.as_str()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Switch to jail")
        .items(&items)
        .default(default_selection(&jails, &active))
        .interact_opt()?;

    match selection {
        Some(index) => Ok(jails.into_iter().nth(index).map(|j| j.id)),
        None => {
            println!("Switch cancelled");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "switch_tests.rs"]
mod tests;
