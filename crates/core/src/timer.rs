// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar timer trigger
//!
//! A timer wraps a recurrence rule and a validity window. The poller calls
//! [`TimerTrigger::update`] on every tick; once the window is exhausted the
//! timer expires for good.

use crate::calendar::{self, MonthDays, TimeOfDay, WeekDays};
use crate::clock::Clock;
use crate::describe;
use crate::error::ValidationError;
use crate::id::{PolicyId, TriggerId};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar pattern governing a timer's fire schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    Once,
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceKind::Once => write!(f, "once"),
            RecurrenceKind::Daily => write!(f, "daily"),
            RecurrenceKind::Weekly => write!(f, "weekly"),
            RecurrenceKind::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for RecurrenceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(RecurrenceKind::Once),
            "daily" | "day" => Ok(RecurrenceKind::Daily),
            "weekly" | "week" => Ok(RecurrenceKind::Weekly),
            "monthly" | "month" => Ok(RecurrenceKind::Monthly),
            other => Err(ValidationError::UnknownRecurrence(other.to_string())),
        }
    }
}

/// Timer creation input as received from the policy service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerInput {
    pub kind: String,
    #[serde(default)]
    pub hour: i64,
    #[serde(default)]
    pub minute: i64,
    #[serde(default)]
    pub week_days: Vec<i64>,
    #[serde(default)]
    pub month_days: Vec<i64>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    /// Seconds east of UTC in which `hour:minute` is interpreted
    #[serde(default)]
    pub utc_offset_secs: i32,
}

impl TimerInput {
    pub fn new(kind: impl Into<String>, hour: i64, minute: i64, end_time: DateTime<Utc>) -> Self {
        Self {
            kind: kind.into(),
            hour,
            minute,
            week_days: vec![],
            month_days: vec![],
            start_time: None,
            end_time,
            utc_offset_secs: 0,
        }
    }

    /// One-shot timer firing at `exec_time` (truncated to the minute)
    pub fn once(exec_time: DateTime<Utc>, utc_offset_secs: i32) -> Self {
        let exec_time = truncate_to_minute(exec_time);
        let wall = to_wall(exec_time, offset_or_utc(utc_offset_secs));
        Self {
            kind: RecurrenceKind::Once.to_string(),
            hour: wall.hour() as i64,
            minute: wall.minute() as i64,
            week_days: vec![],
            month_days: vec![],
            start_time: Some(exec_time),
            end_time: exec_time,
            utc_offset_secs,
        }
    }

    pub fn with_week_days(mut self, days: Vec<i64>) -> Self {
        self.week_days = days;
        self
    }

    pub fn with_month_days(mut self, days: Vec<i64>) -> Self {
        self.month_days = days;
        self
    }

    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_utc_offset(mut self, secs: i32) -> Self {
        self.utc_offset_secs = secs;
        self
    }

    /// Check the input against `now` and normalize it into a [`TimerSpec`].
    ///
    /// Day sets that do not belong to the recurrence kind are cleared. A once
    /// timer fires at `end_time` truncated to the minute; its `hour`, `minute`
    /// and `start_time` are derived from that instant.
    pub fn validate(self, now: DateTime<Utc>) -> Result<TimerSpec, ValidationError> {
        let kind: RecurrenceKind = self.kind.parse()?;
        let utc_offset = FixedOffset::east_opt(self.utc_offset_secs)
            .ok_or(ValidationError::InvalidUtcOffset(self.utc_offset_secs))?;

        let (at, start_time, end_time) = match kind {
            RecurrenceKind::Once => {
                let exec_time = truncate_to_minute(self.end_time);
                let wall = to_wall(exec_time, utc_offset);
                let at = TimeOfDay::new(wall.hour() as i64, wall.minute() as i64)?;
                (at, exec_time, exec_time)
            }
            _ => (
                TimeOfDay::new(self.hour, self.minute)?,
                self.start_time.unwrap_or(now),
                self.end_time,
            ),
        };

        let (week_days, month_days) = match kind {
            RecurrenceKind::Once | RecurrenceKind::Daily => (WeekDays::EMPTY, MonthDays::EMPTY),
            RecurrenceKind::Weekly => {
                let days = WeekDays::from_days(self.week_days)?;
                if days.is_empty() {
                    return Err(ValidationError::MissingWeekDays);
                }
                (days, MonthDays::EMPTY)
            }
            RecurrenceKind::Monthly => {
                let days = MonthDays::from_days(self.month_days)?;
                if days.is_empty() {
                    return Err(ValidationError::MissingMonthDays);
                }
                (WeekDays::EMPTY, days)
            }
        };

        if end_time <= now {
            return Err(ValidationError::EndTimeInPast);
        }
        if start_time > end_time {
            return Err(ValidationError::StartAfterEnd);
        }

        Ok(TimerSpec {
            kind,
            at,
            week_days,
            month_days,
            start_time,
            end_time,
            utc_offset,
        })
    }
}

/// Validated timer definition
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSpec {
    pub kind: RecurrenceKind,
    pub at: TimeOfDay,
    pub week_days: WeekDays,
    pub month_days: MonthDays,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub utc_offset: FixedOffset,
}

/// Outcome of [`TimerTrigger::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// A new fire time was computed
    Scheduled { next: DateTime<Utc> },
    /// The stored fire time is still ahead of the reference
    Unchanged,
    /// The timer has expired (now or earlier)
    Expired,
}

/// A calendar timer with a validity window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerTrigger {
    pub id: TriggerId,
    pub policy_id: PolicyId,
    pub kind: RecurrenceKind,
    pub at: TimeOfDay,
    #[serde(default)]
    pub week_days: WeekDays,
    #[serde(default)]
    pub month_days: MonthDays,
    pub start_time: DateTime<Utc>,
    /// Exclusive upper bound of the validity window
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub utc_offset_secs: i32,
    #[serde(default)]
    pub next_fire_time: Option<DateTime<Utc>>,
    /// Terminal: once set it is never cleared
    #[serde(default)]
    pub is_expired: bool,
}

impl TimerTrigger {
    pub fn new(id: TriggerId, policy_id: PolicyId, spec: TimerSpec) -> Self {
        Self {
            id,
            policy_id,
            kind: spec.kind,
            at: spec.at,
            week_days: spec.week_days,
            month_days: spec.month_days,
            start_time: spec.start_time,
            end_time: spec.end_time,
            utc_offset_secs: spec.utc_offset.local_minus_utc(),
            next_fire_time: None,
            is_expired: false,
        }
    }

    pub fn utc_offset(&self) -> FixedOffset {
        offset_or_utc(self.utc_offset_secs)
    }

    /// Recompute the next fire time relative to `reference`.
    ///
    /// Safe to call repeatedly: while the stored fire time is not behind the
    /// reference nothing changes.
    pub fn update(&mut self, reference: DateTime<Utc>) -> TimerStatus {
        if self.is_expired {
            return TimerStatus::Expired;
        }
        if reference >= self.end_time {
            self.is_expired = true;
            return TimerStatus::Expired;
        }
        let reference = reference.max(self.start_time);
        if self.next_fire_time.is_some_and(|next| next >= reference) {
            return TimerStatus::Unchanged;
        }

        let offset = self.utc_offset();
        let next = from_wall(self.next_occurrence(to_wall(reference, offset)), offset);
        tracing::debug!(trigger_id = %self.id, %reference, %next, "computed next fire time");

        self.next_fire_time = Some(next);
        if next > self.end_time {
            self.is_expired = true;
            return TimerStatus::Expired;
        }
        TimerStatus::Scheduled { next }
    }

    /// [`update`](Self::update) against the current time
    pub fn update_now(&mut self, clock: &impl Clock) -> TimerStatus {
        self.update(clock.now())
    }

    /// Whether the fire time has been reached
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired && self.next_fire_time.is_some_and(|next| next <= now)
    }

    /// Move past an occurrence that fired at `fired_at` so it is not reported again
    pub fn advance_past(&mut self, fired_at: DateTime<Utc>) -> TimerStatus {
        self.update(fired_at + Duration::seconds(1))
    }

    /// Presence in the active schedule is the trigger condition
    pub fn is_trigger(&self) -> bool {
        !self.is_expired
    }

    pub fn describe(&self, policy_name: &str) -> String {
        let detail = match self.kind {
            RecurrenceKind::Once => self
                .end_time
                .with_timezone(&self.utc_offset())
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            RecurrenceKind::Daily => format!("{} every day", self.at),
            RecurrenceKind::Weekly => describe::week_days(self.at, self.week_days),
            RecurrenceKind::Monthly => describe::month_days(self.at, self.month_days),
        };
        format!("Schedule task({detail}) execute scaling policy \"{policy_name}\"")
    }

    fn next_occurrence(&self, reference: NaiveDateTime) -> NaiveDateTime {
        match self.kind {
            RecurrenceKind::Once | RecurrenceKind::Daily => calendar::next_daily(reference, self.at),
            RecurrenceKind::Weekly => calendar::next_weekly(reference, self.at, self.week_days),
            RecurrenceKind::Monthly => {
                calendar::next_monthly(reference, self.at, self.month_days)
            }
        }
    }
}

fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        - Duration::seconds(instant.second() as i64)
        - Duration::nanoseconds(instant.nanosecond() as i64)
}

fn offset_or_utc(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix())
}

fn to_wall(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    instant.with_timezone(&offset).naive_local()
}

fn from_wall(wall: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    (wall - Duration::seconds(offset.local_minus_utc() as i64)).and_utc()
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
