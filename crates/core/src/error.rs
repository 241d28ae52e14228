// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation errors for trigger creation input

use crate::calendar::CalendarError;
use thiserror::Error;

/// Malformed creation input. Reported synchronously; nothing is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("unknown cycle type {0}")]
    UnknownRecurrence(String),
    #[error("week_days should not be empty")]
    MissingWeekDays,
    #[error("month_days should not be empty")]
    MissingMonthDays,
    #[error("end_time is earlier than now")]
    EndTimeInPast,
    #[error("start_time is after end_time")]
    StartAfterEnd,
    #[error("utc offset out of range: {0}s")]
    InvalidUtcOffset(i32),
    #[error("unknown operator in alarm {0}")]
    UnknownOperator(String),
    #[error("unknown indicator in alarm {0}")]
    UnknownIndicator(String),
    #[error("unknown wrapper in alarm {0}")]
    UnknownWrapper(String),
    #[error("the min value of cycle in alarm is 300, got {0}")]
    CycleTooShort(i64),
    #[error("cumulate in alarm should be at least 1, got {0}")]
    InvalidCumulate(i64),
}
