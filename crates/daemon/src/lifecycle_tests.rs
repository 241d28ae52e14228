// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{Duration, TimeZone, Utc};
use trig_core::{FakeClock, PolicyId, TimerInput, TimerTrigger, Trigger, TriggerId};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        store_dir: dir.join("store"),
        ..Config::default()
    }
}

#[test]
fn startup_creates_store_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let daemon = startup(&config, FakeClock::new()).unwrap();

    assert!(config.store_dir.join("triggers").is_dir());
    assert!(daemon.tick().is_empty());
}

#[test]
fn tick_fires_stored_timer() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap();

    let store = JsonStore::open(&config.store_dir).unwrap();
    let spec = TimerInput::new("daily", 9, 0, now + Duration::days(10))
        .validate(now)
        .unwrap();
    let mut timer = TimerTrigger::new(TriggerId::new("t-1"), PolicyId::new("p-1"), spec);
    timer.update(now);
    store.put(&Trigger::Timer(timer)).unwrap();

    let clock = FakeClock::at(now);
    let daemon = startup(&config, clock.clone()).unwrap();

    assert!(daemon.tick().is_empty());
    clock.advance(Duration::hours(1));
    let events = daemon.tick();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), "trigger:fired");
}

#[tokio::test]
async fn tick_blocking_runs_the_timer_pass_off_the_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();

    let store = JsonStore::open(&config.store_dir).unwrap();
    let spec = TimerInput::new("daily", 9, 0, now + Duration::days(10))
        .validate(now - Duration::hours(1))
        .unwrap();
    let mut timer = TimerTrigger::new(TriggerId::new("t-1"), PolicyId::new("p-1"), spec);
    timer.update(now - Duration::hours(1));
    store.put(&Trigger::Timer(timer)).unwrap();

    let daemon = Arc::new(startup(&config, FakeClock::at(now)).unwrap());

    let events = Arc::clone(&daemon).tick_blocking().await.unwrap();

    assert_eq!(events.len(), 1);
    assert!(Arc::clone(&daemon).tick_blocking().await.unwrap().is_empty());
}
