// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory trigger store

use crate::store::{StoreError, TriggerStore, Versioned};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use trig_core::{Trigger, TriggerId};

#[derive(Default)]
struct MemoryState {
    records: BTreeMap<TriggerId, Versioned<Trigger>>,
    fail_writes: bool,
}

/// Trigger store held in process memory; clones share the same records
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with [`StoreError::Unavailable`]
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Overwrite a record behind the back of any reader, bumping its revision
    #[cfg(any(test, feature = "test-support"))]
    pub fn bump_revision(&self, id: &TriggerId) {
        if let Some(record) = self.lock().records.get_mut(id) {
            record.revision += 1;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TriggerStore for MemoryStore {
    fn get(&self, id: &TriggerId) -> Result<Versioned<Trigger>, StoreError> {
        self.lock()
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn put(&self, trigger: &Trigger) -> Result<u64, StoreError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        let revision = state
            .records
            .get(trigger.id())
            .map_or(1, |r| r.revision + 1);
        state.records.insert(
            trigger.id().clone(),
            Versioned {
                revision,
                value: trigger.clone(),
            },
        );
        Ok(revision)
    }

    fn compare_and_put(&self, trigger: &Trigger, expected: u64) -> Result<u64, StoreError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        let record = state
            .records
            .get_mut(trigger.id())
            .ok_or_else(|| StoreError::NotFound(trigger.id().clone()))?;
        if record.revision != expected {
            return Err(StoreError::Conflict {
                id: trigger.id().clone(),
                expected,
                actual: record.revision,
            });
        }
        record.revision += 1;
        record.value = trigger.clone();
        Ok(record.revision)
    }

    fn delete(&self, id: &TriggerId) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        state.records.remove(id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<TriggerId>, StoreError> {
        Ok(self.lock().records.keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
