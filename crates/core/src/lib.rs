// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tswitch-core: pure types and parsing for the trimorph jail switcher

pub mod clock;
pub mod jail;
pub mod outcome;
pub mod scope;
pub mod status;
pub mod time_fmt;

pub use clock::{Clock, SystemClock};
pub use jail::{JailConfig, JailId, DEFAULT_JAIL_SUFFIX};
pub use outcome::{classify, Severity, SwitchError, SwitchOutcome, SwitchRequest};
pub use scope::{parse_active_scopes, SCOPE_MARKER, SCOPE_SUFFIX};
pub use status::{render, Generation, StatusDisplay, StatusSlot, StatusSnapshot, SWITCH_COMMAND};
pub use time_fmt::format_age;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
