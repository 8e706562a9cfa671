// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the jail directory, systemd, trimorph-solo,
//! status sinks and user notifications

mod env;
pub mod jails;
pub mod notify;
pub mod probe;
pub mod sink;
pub mod subprocess;
pub mod switch;
pub mod traced;
pub mod watch;

pub use jails::{list_jails, JailDirError};
pub use notify::{
    ConsoleNotifyAdapter, DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError,
    TeeNotifyAdapter,
};
pub use probe::{probe_active, ProbeAdapter, ProbeError, SystemctlProbe};
pub use sink::{read_status_file, FileStatusSink, SinkError, StatusSink};
pub use switch::{SoloSwitchAdapter, SwitchAdapter};
pub use traced::{TracedProbe, TracedSwitch};
pub use watch::{watch_jail_dir, DirWatcher, WatchError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use probe::FakeProbe;
#[cfg(any(test, feature = "test-support"))]
pub use sink::FakeStatusSink;
#[cfg(any(test, feature = "test-support"))]
pub use switch::FakeSwitchAdapter;
