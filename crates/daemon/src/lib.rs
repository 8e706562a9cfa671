// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tswitch daemon library
//!
//! Exposes the daemon configuration and lifecycle so the CLI resolves the
//! same state directory and status file, plus the poll/watch loop.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod watch_loop;

pub use lifecycle::{Config, DaemonRefresher, DaemonState, LifecycleError, STATUS_FILE};
pub use watch_loop::WatchSettings;
