// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tswitch engine: the refresh action and switch orchestration

mod refresher;
mod switcher;

pub use refresher::Refresher;
pub use switcher::{SwitchReport, Switcher, NOTIFY_TITLE};
