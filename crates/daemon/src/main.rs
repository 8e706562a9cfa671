// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tswitch daemon (tswitchd)
//!
//! Keeps `<state_dir>/status.json` in step with the active trimorph jail,
//! refreshing on a timer and whenever the jail directory changes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use tswitch_daemon::lifecycle::{self, read_pid};
use tswitch_daemon::{watch_loop, Config, LifecycleError};

const USAGE: &str = "Usage: tswitchd [--help | --version]";

const HELP: &str = "\
trimorph jail status daemon - keeps the jail status file current

USAGE:
    tswitchd

Runs in the foreground and prints READY once the first status
is published. Stop it with SIGTERM or SIGINT.

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information";

/// What the command line asks for
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Run,
    Version,
    Help,
    Invalid(String),
}

/// Info flags are answered before any config or lock acquisition
fn parse_args(mut args: impl Iterator<Item = String>) -> Invocation {
    match args.next().as_deref() {
        None => Invocation::Run,
        Some("--version" | "-V" | "-v") => Invocation::Version,
        Some("--help" | "-h" | "help") => Invocation::Help,
        Some(other) => Invocation::Invalid(other.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match parse_args(std::env::args().skip(1)) {
        Invocation::Run => {}
        Invocation::Version => {
            println!("tswitchd {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Invocation::Help => {
            println!("tswitchd {}", env!("CARGO_PKG_VERSION"));
            println!("{HELP}");
            return Ok(());
        }
        Invocation::Invalid(arg) => {
            eprintln!("error: unexpected argument '{arg}'");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    let config = Config::load()?;

    // Write startup marker to log (before tracing setup)
    write_startup_marker(&config)?;

    let log_guard = setup_logging(&config)?;

    info!("Starting jail status daemon");

    let daemon = match lifecycle::startup(&config) {
        Ok(daemon) => daemon,
        Err(LifecycleError::LockFailed(_)) => {
            eprintln!("tswitchd is already running");
            if let Some(pid) = read_pid(&config.lock_path) {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config, &e);
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
    };

    watch_loop::run(
        daemon.refresher.clone(),
        config.watch_settings(),
        |snapshot| {
            if let Some(snapshot) = snapshot {
                info!(label = %snapshot.display.label, "initial status published");
            }
            // Signal ready for a parent process waiting on startup
            println!("READY");
        },
        shutdown,
    )
    .await;

    daemon.shutdown();
    info!("Daemon stopped");
    Ok(())
}

/// Startup marker prefix written to log before anything else.
/// Full format: "--- tswitchd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- tswitchd: starting (pid: ";

/// Append the startup marker to the log file
fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to log file.
fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = config.log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(
        log_dir,
        config
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
