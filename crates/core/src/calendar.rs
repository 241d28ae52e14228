// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar arithmetic for recurring timers
//!
//! Everything here is pure and works on wall-clock [`NaiveDateTime`] values.
//! Time zone handling belongs to the caller (see [`crate::timer`]).
//!
//! Recurrence rules:
//! - **Daily**: next occurrence of `hh:mm` at or after the reference
//! - **Weekly**: daily candidate, pushed forward to the nearest selected weekday
//! - **Monthly**: daily candidate, pushed forward to the nearest selected day
//!   that exists in its month, skipping months that are too short

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from constructing calendar values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("hour should be between 0 and 23, got {0}")]
    InvalidHour(i64),
    #[error("minute should be between 0 and 59, got {0}")]
    InvalidMinute(i64),
    #[error("week day should be between 1 and 7, got {0}")]
    InvalidWeekDay(i64),
    #[error("month day should be between 1 and 31, got {0}")]
    InvalidMonthDay(i64),
}

/// A time of day with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay", into = "RawTimeOfDay")]
pub struct TimeOfDay(NaiveTime);

#[derive(Serialize, Deserialize)]
struct RawTimeOfDay {
    hour: i64,
    minute: i64,
}

impl TimeOfDay {
    pub fn new(hour: i64, minute: i64) -> Result<Self, CalendarError> {
        if !(0..=23).contains(&hour) {
            return Err(CalendarError::InvalidHour(hour));
        }
        if !(0..=59).contains(&minute) {
            return Err(CalendarError::InvalidMinute(minute));
        }
        NaiveTime::from_hms_opt(hour as u32, minute as u32, 0)
            .map(Self)
            .ok_or(CalendarError::InvalidHour(hour))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = CalendarError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

impl From<TimeOfDay> for RawTimeOfDay {
    fn from(t: TimeOfDay) -> Self {
        Self {
            hour: t.hour() as i64,
            minute: t.minute() as i64,
        }
    }
}

/// Set of ISO weekdays, 1 = Monday through 7 = Sunday
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u32>")]
pub struct WeekDays(u8);

impl WeekDays {
    pub const EMPTY: WeekDays = WeekDays(0);

    pub fn from_days(days: impl IntoIterator<Item = i64>) -> Result<Self, CalendarError> {
        let mut bits = 0u8;
        for day in days {
            if !(1..=7).contains(&day) {
                return Err(CalendarError::InvalidWeekDay(day));
            }
            bits |= 1u8 << day;
        }
        Ok(Self(bits))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, day: u32) -> bool {
        day <= 7 && self.0 & (1u8 << day) != 0
    }

    /// Selected days in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=7).filter(move |d| self.contains(*d))
    }
}

impl TryFrom<Vec<i64>> for WeekDays {
    type Error = CalendarError;

    fn try_from(days: Vec<i64>) -> Result<Self, Self::Error> {
        Self::from_days(days)
    }
}

impl From<WeekDays> for Vec<u32> {
    fn from(days: WeekDays) -> Self {
        days.iter().collect()
    }
}

/// Set of days of the month, 1 through 31
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u32>")]
pub struct MonthDays(u32);

impl MonthDays {
    pub const EMPTY: MonthDays = MonthDays(0);

    pub fn from_days(days: impl IntoIterator<Item = i64>) -> Result<Self, CalendarError> {
        let mut bits = 0u32;
        for day in days {
            if !(1..=31).contains(&day) {
                return Err(CalendarError::InvalidMonthDay(day));
            }
            bits |= 1u32 << day;
        }
        Ok(Self(bits))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, day: u32) -> bool {
        day <= 31 && self.0 & (1u32 << day) != 0
    }

    /// Selected days in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=31).filter(move |d| self.contains(*d))
    }
}

impl TryFrom<Vec<i64>> for MonthDays {
    type Error = CalendarError;

    fn try_from(days: Vec<i64>) -> Result<Self, Self::Error> {
        Self::from_days(days)
    }
}

impl From<MonthDays> for Vec<u32> {
    fn from(days: MonthDays) -> Self {
        days.iter().collect()
    }
}

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    month
        .checked_sub(1)
        .and_then(|m| DAYS_IN_MONTH.get(m as usize))
        .copied()
        .unwrap_or(0)
}

/// Next timestamp at or after `reference` whose clock time is `at`
pub fn next_daily(reference: NaiveDateTime, at: TimeOfDay) -> NaiveDateTime {
    let candidate = reference.date().and_time(at.time());
    if reference > candidate {
        candidate + Duration::days(1)
    } else {
        candidate
    }
}

/// Next daily candidate that falls on one of `days`.
///
/// An empty set behaves like [`next_daily`].
pub fn next_weekly(reference: NaiveDateTime, at: TimeOfDay, days: WeekDays) -> NaiveDateTime {
    let candidate = next_daily(reference, at);
    let Some(first) = days.iter().next() else {
        return candidate;
    };

    let today = candidate.weekday().number_from_monday();
    let offset = days
        .iter()
        .find(|d| *d >= today)
        .map(|d| d - today)
        // every selected day this week has passed
        .unwrap_or(first + 7 - today);

    candidate + Duration::days(offset as i64)
}

/// Next daily candidate that falls on one of `days`, skipping months where
/// the nearest selected day does not exist.
///
/// An empty set behaves like [`next_daily`].
pub fn next_monthly(reference: NaiveDateTime, at: TimeOfDay, days: MonthDays) -> NaiveDateTime {
    let candidate = next_daily(reference, at);
    if days.is_empty() {
        return candidate;
    }

    let mut cursor = Some(candidate.date());
    while let Some(date) = cursor {
        let limit = days_in_month(date.year(), date.month());
        let hit = days
            .iter()
            .find(|d| *d >= date.day())
            .filter(|d| *d <= limit)
            .and_then(|d| NaiveDate::from_ymd_opt(date.year(), date.month(), d));
        if let Some(day) = hit {
            return day.and_time(at.time());
        }
        cursor = first_of_next_month(date);
    }

    // Only reachable at the end of chrono's representable range
    candidate
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
