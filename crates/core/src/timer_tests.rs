// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use chrono::TimeZone;
use yare::parameterized;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn make_timer(input: TimerInput, now: DateTime<Utc>) -> TimerTrigger {
    let spec = input.validate(now).unwrap();
    TimerTrigger::new(TriggerId::new("timer-1"), PolicyId::new("policy-1"), spec)
}

fn daily_timer(now: DateTime<Utc>) -> TimerTrigger {
    make_timer(
        TimerInput::new("daily", 9, 30, utc(2024, 12, 31, 0, 0)).with_start_time(now),
        now,
    )
}

#[parameterized(
    hour_too_large = { 24, 0 },
    hour_negative = { -1, 0 },
    minute_too_large = { 0, 60 },
    minute_negative = { 0, -5 },
)]
fn validate_rejects_time_out_of_range(hour: i64, minute: i64) {
    let now = utc(2024, 6, 1, 0, 0);
    let input = TimerInput::new("daily", hour, minute, utc(2024, 7, 1, 0, 0));
    assert!(matches!(
        input.validate(now),
        Err(ValidationError::Calendar(_))
    ));
}

#[test]
fn validate_rejects_unknown_kind() {
    let now = utc(2024, 6, 1, 0, 0);
    let input = TimerInput::new("fortnightly", 9, 0, utc(2024, 7, 1, 0, 0));
    assert_eq!(
        input.validate(now),
        Err(ValidationError::UnknownRecurrence("fortnightly".to_string()))
    );
}

#[test]
fn validate_requires_week_days_for_weekly() {
    let now = utc(2024, 6, 1, 0, 0);
    let input = TimerInput::new("weekly", 9, 0, utc(2024, 7, 1, 0, 0));
    assert_eq!(input.validate(now), Err(ValidationError::MissingWeekDays));
}

#[test]
fn validate_requires_month_days_for_monthly() {
    let now = utc(2024, 6, 1, 0, 0);
    let input = TimerInput::new("monthly", 9, 0, utc(2024, 7, 1, 0, 0)).with_week_days(vec![1]);
    assert_eq!(input.validate(now), Err(ValidationError::MissingMonthDays));
}

#[test]
fn validate_rejects_end_time_not_after_now() {
    let now = utc(2024, 6, 1, 0, 0);
    let input = TimerInput::new("daily", 9, 0, now);
    assert_eq!(input.validate(now), Err(ValidationError::EndTimeInPast));
}

#[test]
fn validate_rejects_bad_day_values() {
    let now = utc(2024, 6, 1, 0, 0);
    let input = TimerInput::new("monthly", 9, 0, utc(2024, 7, 1, 0, 0)).with_month_days(vec![0]);
    assert!(matches!(
        input.validate(now),
        Err(ValidationError::Calendar(_))
    ));
}

#[test]
fn validate_clears_day_sets_that_do_not_apply() {
    let now = utc(2024, 6, 1, 0, 0);
    let end = utc(2024, 7, 1, 0, 0);

    let daily = TimerInput::new("daily", 9, 0, end)
        .with_week_days(vec![1, 2])
        .with_month_days(vec![3])
        .validate(now)
        .unwrap();
    assert!(daily.week_days.is_empty());
    assert!(daily.month_days.is_empty());

    let weekly = TimerInput::new("weekly", 9, 0, end)
        .with_week_days(vec![1, 2])
        .with_month_days(vec![3])
        .validate(now)
        .unwrap();
    assert!(!weekly.week_days.is_empty());
    assert!(weekly.month_days.is_empty());
}

#[test]
fn validate_defaults_start_time_to_now() {
    let now = utc(2024, 6, 1, 0, 0);
    let spec = TimerInput::new("daily", 9, 0, utc(2024, 7, 1, 0, 0))
        .validate(now)
        .unwrap();
    assert_eq!(spec.start_time, now);
}

#[test]
fn validate_once_takes_schedule_from_end_time() {
    let now = utc(2024, 6, 1, 0, 0);
    let end = Utc.with_ymd_and_hms(2024, 6, 3, 14, 45, 20).unwrap();

    let spec = TimerInput::new("once", 9, 0, end)
        .with_start_time(now)
        .with_utc_offset(3600)
        .validate(now)
        .unwrap();

    assert_eq!(spec.at, TimeOfDay::new(15, 45).unwrap());
    assert_eq!(spec.start_time, utc(2024, 6, 3, 14, 45));
    assert_eq!(spec.end_time, utc(2024, 6, 3, 14, 45));
}

#[test]
fn once_input_without_constructor_fires_a_single_time() {
    let now = utc(2026, 3, 2, 8, 0);
    let mut timer = make_timer(TimerInput::new("once", 9, 0, utc(2026, 3, 5, 12, 0)), now);
    timer.update(now);

    let mut fires = vec![];
    let mut t = now;
    while t < utc(2026, 3, 6, 0, 0) {
        if timer.is_due(t) {
            fires.push(t);
            timer.advance_past(t);
        } else {
            timer.update(t);
        }
        t += Duration::minutes(1);
    }

    assert_eq!(fires, vec![utc(2026, 3, 5, 12, 0)]);
    assert!(timer.is_expired);
}

#[test]
fn update_computes_next_daily_fire_time() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);

    let status = timer.update(now);

    assert_eq!(
        status,
        TimerStatus::Scheduled {
            next: utc(2024, 6, 16, 9, 30)
        }
    );
    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 16, 9, 30)));
    assert!(timer.is_trigger());
}

#[test]
fn update_is_idempotent_for_same_reference() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);

    timer.update(now);
    let first = timer.next_fire_time;
    let status = timer.update(now);

    assert_eq!(status, TimerStatus::Unchanged);
    assert_eq!(timer.next_fire_time, first);
}

#[test]
fn update_is_noop_while_fire_time_is_ahead() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);
    timer.update(now);

    let status = timer.update(utc(2024, 6, 16, 9, 0));

    assert_eq!(status, TimerStatus::Unchanged);
    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 16, 9, 30)));
}

#[test]
fn update_recomputes_once_fire_time_has_passed() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);
    timer.update(now);

    timer.update(utc(2024, 6, 16, 9, 31));

    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 17, 9, 30)));
}

#[test]
fn update_clamps_reference_to_start_time() {
    let now = utc(2024, 6, 1, 0, 0);
    let mut timer = make_timer(
        TimerInput::new("daily", 9, 30, utc(2024, 12, 31, 0, 0))
            .with_start_time(utc(2024, 6, 20, 12, 0)),
        now,
    );

    timer.update(now);

    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 21, 9, 30)));
}

#[test]
fn update_past_end_time_expires() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);

    let status = timer.update(utc(2025, 1, 1, 0, 0));

    assert_eq!(status, TimerStatus::Expired);
    assert!(timer.is_expired);
    assert!(!timer.is_trigger());
}

#[test]
fn expired_timer_never_clears() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);
    timer.update(utc(2025, 1, 1, 0, 0));

    for reference in [now, utc(2024, 6, 16, 0, 0), utc(2026, 1, 1, 0, 0)] {
        assert_eq!(timer.update(reference), TimerStatus::Expired);
        assert!(timer.is_expired);
    }
}

#[test]
fn next_fire_time_beyond_end_expires() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = make_timer(
        TimerInput::new("daily", 9, 30, utc(2024, 6, 16, 9, 0)).with_start_time(now),
        now,
    );

    let status = timer.update(now);

    assert_eq!(status, TimerStatus::Expired);
    assert!(timer.is_expired);
}

#[test]
fn weekly_update_uses_selected_days() {
    // Saturday
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = make_timer(
        TimerInput::new("weekly", 9, 0, utc(2024, 12, 31, 0, 0))
            .with_week_days(vec![1, 3, 5])
            .with_start_time(now),
        now,
    );

    timer.update(now);

    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 17, 9, 0)));
}

#[test]
fn monthly_update_skips_short_months() {
    let now = utc(2024, 2, 10, 12, 0);
    let mut timer = make_timer(
        TimerInput::new("monthly", 6, 0, utc(2024, 12, 31, 0, 0))
            .with_month_days(vec![31])
            .with_start_time(now),
        now,
    );

    timer.update(now);

    assert_eq!(timer.next_fire_time, Some(utc(2024, 3, 31, 6, 0)));
}

#[test]
fn hour_is_interpreted_in_timer_offset() {
    let now = utc(2024, 6, 15, 0, 0);
    let mut timer = make_timer(
        TimerInput::new("daily", 9, 0, utc(2024, 12, 31, 0, 0))
            .with_utc_offset(8 * 3600)
            .with_start_time(now),
        now,
    );

    timer.update(now);

    // 09:00 at UTC+8 is 01:00 UTC
    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 15, 1, 0)));
}

#[test]
fn due_and_advance_past_moves_to_next_occurrence() {
    let now = utc(2024, 6, 15, 10, 0);
    let mut timer = daily_timer(now);
    timer.update(now);

    let fire_at = utc(2024, 6, 16, 9, 30);
    assert!(!timer.is_due(utc(2024, 6, 16, 9, 29)));
    assert!(timer.is_due(fire_at));

    timer.advance_past(fire_at);

    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 17, 9, 30)));
    assert!(!timer.is_due(fire_at));
}

#[test]
fn once_timer_fires_once_then_expires() {
    let clock = FakeClock::at(utc(2024, 6, 1, 0, 0));
    let exec = Utc.with_ymd_and_hms(2024, 6, 3, 14, 45, 20).unwrap();
    let mut timer = make_timer(TimerInput::once(exec, 0), clock.now());

    timer.update_now(&clock);
    assert_eq!(timer.next_fire_time, Some(utc(2024, 6, 3, 14, 45)));

    clock.set(utc(2024, 6, 3, 14, 46));
    assert!(timer.is_due(clock.now()));
    assert_eq!(timer.advance_past(clock.now()), TimerStatus::Expired);
    assert!(timer.is_expired);
}

#[test]
fn describe_renders_each_kind() {
    let now = utc(2024, 6, 1, 0, 0);
    let end = utc(2024, 12, 31, 0, 0);

    let daily = make_timer(TimerInput::new("daily", 9, 5, end), now);
    assert_eq!(
        daily.describe("web"),
        r#"Schedule task(09:05 every day) execute scaling policy "web""#
    );

    let weekly = make_timer(
        TimerInput::new("weekly", 18, 0, end).with_week_days(vec![5, 1, 3]),
        now,
    );
    assert_eq!(
        weekly.describe("web"),
        r#"Schedule task(18:00 every Monday, Wednesday and Friday) execute scaling policy "web""#
    );

    let monthly = make_timer(
        TimerInput::new("monthly", 0, 30, end).with_month_days(vec![1, 22]),
        now,
    );
    assert_eq!(
        monthly.describe("web"),
        r#"Schedule task(00:30 on the 1st and 22nd of each month) execute scaling policy "web""#
    );

    let once = make_timer(TimerInput::once(utc(2024, 6, 3, 14, 45), 8 * 3600), now);
    assert_eq!(
        once.describe("web"),
        r#"Schedule task(2024-06-03 22:45:00) execute scaling policy "web""#
    );
}
