// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Trigger engine: registration, timer polling and alarm observation

mod config;
mod error;
mod observer;
mod poller;
mod registry;

pub use config::EngineConfig;
pub use error::{EngineError, ProvisionError};
pub use observer::AlarmObserver;
pub use poller::TimerPoller;
pub use registry::{RegistryDeps, TriggerRegistry};
