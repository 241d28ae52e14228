// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use trig_core::{AlarmInput, AlarmTrigger, PolicyId};

fn alarm(id: &str) -> Trigger {
    let spec = AlarmInput::new("cpu", "max", 80.0, 2).validate().unwrap();
    AlarmTrigger::new(TriggerId::new(id), PolicyId::new("policy-1"), spec).into()
}

#[test]
fn put_then_get_starts_at_revision_one() {
    let store = MemoryStore::new();

    let revision = store.put(&alarm("a")).unwrap();
    let loaded = store.get(&TriggerId::new("a")).unwrap();

    assert_eq!(revision, 1);
    assert_eq!(loaded.revision, 1);
    assert_eq!(loaded.value, alarm("a"));
}

#[test]
fn get_missing_is_not_found() {
    let store = MemoryStore::new();
    let err = store.get(&TriggerId::new("nope")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == TriggerId::new("nope")));
}

#[test]
fn compare_and_put_advances_revision() {
    let store = MemoryStore::new();
    store.put(&alarm("a")).unwrap();

    let revision = store.compare_and_put(&alarm("a"), 1).unwrap();

    assert_eq!(revision, 2);
    assert_eq!(store.get(&TriggerId::new("a")).unwrap().revision, 2);
}

#[test]
fn compare_and_put_with_stale_revision_conflicts() {
    let store = MemoryStore::new();
    store.put(&alarm("a")).unwrap();
    store.put(&alarm("a")).unwrap();

    let err = store.compare_and_put(&alarm("a"), 1).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Conflict {
            expected: 1,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn compare_and_put_after_delete_is_not_found() {
    let store = MemoryStore::new();
    store.put(&alarm("a")).unwrap();
    store.delete(&TriggerId::new("a")).unwrap();

    let err = store.compare_and_put(&alarm("a"), 1).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn delete_missing_is_ok() {
    let store = MemoryStore::new();
    store.delete(&TriggerId::new("ghost")).unwrap();
}

#[test]
fn list_returns_sorted_ids() {
    let store = MemoryStore::new();
    store.put(&alarm("b")).unwrap();
    store.put(&alarm("a")).unwrap();

    assert_eq!(
        store.list().unwrap(),
        vec![TriggerId::new("a"), TriggerId::new("b")]
    );
}

#[test]
fn clones_share_records() {
    let store = MemoryStore::new();
    let other = store.clone();

    store.put(&alarm("a")).unwrap();

    assert!(other.get(&TriggerId::new("a")).is_ok());
}

#[test]
fn failed_writes_leave_records_untouched() {
    let store = MemoryStore::new();
    store.put(&alarm("a")).unwrap();
    store.fail_writes(true);

    assert!(matches!(
        store.compare_and_put(&alarm("a"), 1),
        Err(StoreError::Unavailable(_))
    ));
    assert!(store.delete(&TriggerId::new("a")).is_err());
    assert_eq!(store.get(&TriggerId::new("a")).unwrap().revision, 1);
}
