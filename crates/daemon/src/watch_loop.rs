// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll/watch loop driving the refresher.
//!
//! One refresh runs to completion at startup. Afterwards a timer and the jail
//! directory watcher each trigger refreshes as independent tasks, so a slow
//! probe never delays the loop. The status slot's generation guard keeps a
//! late completion from replacing a newer one.
//!
//! A jail directory that cannot be watched (it may not exist yet) is retried
//! every `watch_retry`; until then the timer alone drives refreshes.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use tswitch_adapters::{watch_jail_dir, ProbeAdapter, StatusSink};
use tswitch_core::{Clock, StatusSnapshot};
use tswitch_engine::Refresher;

/// Pending filesystem changes buffered between loop iterations
const FS_EVENT_BUFFER: usize = 64;

/// How often an unavailable jail directory watch is retried
pub const WATCH_RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// What the loop watches and how often it polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    pub jails_dir: PathBuf,
    pub suffix: String,
    pub poll_interval: Duration,
    pub watch_retry: Duration,
}

/// Run until `shutdown` resolves.
///
/// `on_ready` is called once, after the startup refresh and after both
/// triggers are armed. On return the watcher has been dropped and any
/// in-flight refresh tasks aborted.
pub async fn run<P, S, C, F>(
    refresher: Refresher<P, S, C>,
    settings: WatchSettings,
    on_ready: impl FnOnce(Option<&StatusSnapshot>),
    shutdown: F,
) where
    P: ProbeAdapter,
    S: StatusSink,
    C: Clock,
    F: Future<Output = ()>,
{
    let initial = refresher.refresh().await;

    let (fs_tx, mut fs_rx) = mpsc::channel(FS_EVENT_BUFFER);
    let mut watcher = match watch_jail_dir(&settings.jails_dir, &settings.suffix, fs_tx.clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!(error = %e, "jail directory watch unavailable, polling only");
            None
        }
    };

    let mut ticker = every(settings.poll_interval);
    let mut retry = every(settings.watch_retry);
    let mut tasks: JoinSet<()> = JoinSet::new();
    tokio::pin!(shutdown);

    on_ready(initial.as_ref());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                spawn_refresh(&mut tasks, &refresher);
            }

            _ = retry.tick(), if watcher.is_none() => {
                match watch_jail_dir(&settings.jails_dir, &settings.suffix, fs_tx.clone()) {
                    Ok(armed) => {
                        info!(dir = %armed.dir().display(), "jail directory watch armed");
                        watcher = Some(armed);
                        // Configs may have appeared along with the directory
                        spawn_refresh(&mut tasks, &refresher);
                    }
                    Err(e) => debug!(error = %e, "jail directory still unavailable"),
                }
            }

            Some(path) = fs_rx.recv(), if watcher.is_some() => {
                // Coalesce a burst of events (editors write several) into one refresh
                let mut coalesced = 0usize;
                while fs_rx.try_recv().is_ok() {
                    coalesced += 1;
                }
                debug!(path = %path.display(), coalesced, "jail config changed");
                spawn_refresh(&mut tasks, &refresher);
            }

            Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = result {
                    warn!(error = %e, "refresh task failed");
                }
            }

            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
        }
    }

    drop(watcher);
    tasks.abort_all();
}

/// Interval whose first tick is one `period` from now
fn every(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn spawn_refresh<P, S, C>(tasks: &mut JoinSet<()>, refresher: &Refresher<P, S, C>)
where
    P: ProbeAdapter,
    S: StatusSink,
    C: Clock,
{
    let refresher = refresher.clone();
    tasks.spawn(async move {
        refresher.refresh().await;
    });
}

#[cfg(test)]
#[path = "watch_loop_tests.rs"]
mod tests;
