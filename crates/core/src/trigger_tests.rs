// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn timer() -> Trigger {
    let input = TriggerInput::Timer(TimerInput::new(
        "daily",
        9,
        0,
        Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
    ));
    input
        .validate(now())
        .unwrap()
        .into_trigger(TriggerId::new("t-1"), PolicyId::new("p-1"))
}

fn alarm(cumulate: i64) -> Trigger {
    let input = TriggerInput::Alarm(AlarmInput::new("cpu", "max", 75.0, cumulate));
    input
        .validate(now())
        .unwrap()
        .into_trigger(TriggerId::new("a-1"), PolicyId::new("p-1"))
}

#[test]
fn accessors_dispatch_by_kind() {
    let t = timer();
    assert_eq!(t.kind(), TriggerKind::Timer);
    assert_eq!(t.id(), &TriggerId::new("t-1"));
    assert!(t.as_timer().is_some());
    assert!(t.as_alarm().is_none());

    let a = alarm(2);
    assert_eq!(a.kind(), TriggerKind::Alarm);
    assert_eq!(a.policy_id(), &PolicyId::new("p-1"));
    assert!(a.as_alarm().is_some());
}

#[test]
fn timer_is_trigger_until_expired() {
    let mut t = timer();
    assert!(t.is_trigger());

    if let Trigger::Timer(inner) = &mut t {
        inner.update(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
    assert!(!t.is_trigger());
}

#[test]
fn alarm_is_trigger_once_provisioned() {
    let mut a = alarm(2);
    assert!(!a.is_trigger());

    if let Trigger::Alarm(inner) = &mut a {
        inner.alert_id = Some("rule-1".to_string());
    }
    assert!(a.is_trigger());
}

#[test]
fn is_trigger_leaves_alarm_streak_untouched() {
    let mut a = alarm(1);
    if let Trigger::Alarm(inner) = &mut a {
        inner.alert_id = Some("rule-1".to_string());
    }
    let before = a.clone();

    for _ in 0..3 {
        assert!(a.is_trigger());
    }

    assert_eq!(a, before);
    let inner = a.as_alarm().unwrap();
    assert_eq!(inner.running_count, 0);
    assert_eq!(inner.last_observed_at, None);
}

#[test]
fn input_parses_from_json_by_trigger_type() {
    let json = r#"{
        "trigger_type": "alarm",
        "indicator": "disk_write",
        "wrapper": "average",
        "value": 2048.0,
        "cumulate": 3
    }"#;
    let input: TriggerInput = serde_json::from_str(json).unwrap();

    let spec = input.validate(now()).unwrap();

    assert!(matches!(spec, TriggerSpec::Alarm(ref a) if a.cycle_seconds == 300));
}

#[test]
fn persisted_form_is_tagged_by_type() {
    let value = serde_json::to_value(alarm(3)).unwrap();
    assert_eq!(value["type"], "alarm");
    assert_eq!(value["indicator"], "cpu");

    let value = serde_json::to_value(timer()).unwrap();
    assert_eq!(value["type"], "timer");
    assert_eq!(value["kind"], "daily");
    assert_eq!(value["at"]["hour"], 9);
}

#[test]
fn fired_event_carries_trigger_identity() {
    let event = TriggerEvent::fired(&alarm(1), now());

    assert_eq!(event.name(), "trigger:fired");
    assert_eq!(event.trigger_id(), &TriggerId::new("a-1"));
    assert!(matches!(
        event,
        TriggerEvent::Fired { kind: TriggerKind::Alarm, .. }
    ));
}

#[test]
fn describe_dispatches_by_kind() {
    assert!(timer().describe("web").starts_with("Schedule task("));
    assert!(alarm(1).describe("web").starts_with("Alarm task("));
}
