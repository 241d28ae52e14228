// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trig-core: trigger evaluation for scaling policies
//!
//! This crate provides:
//! - Pure calendar arithmetic for once/daily/weekly/monthly recurrence
//! - The timer trigger with its validity window and expiry
//! - The alarm trigger with its cumulative-cycle counter
//! - A uniform [`Trigger`] enum over both kinds, plus description tables
//! - Clock and id abstractions for testable time and identity

pub mod clock;
pub mod id;

pub mod alarm;
pub mod calendar;
pub mod describe;
pub mod error;
pub mod timer;
pub mod trigger;

// Re-exports
pub use alarm::{
    AlarmInput, AlarmSpec, AlarmTrigger, AlertRule, Indicator, Observation, Operator, Wrapper,
    MIN_CYCLE_SECS,
};
pub use calendar::{CalendarError, MonthDays, TimeOfDay, WeekDays};
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::ValidationError;
pub use id::{IdGen, PolicyId, SequentialIdGen, TriggerId, UuidIdGen};
pub use timer::{RecurrenceKind, TimerInput, TimerSpec, TimerStatus, TimerTrigger};
pub use trigger::{Trigger, TriggerEvent, TriggerInput, TriggerKind, TriggerSpec};
