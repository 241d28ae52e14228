// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-based trigger store
//!
//! One file per trigger under `<base>/triggers/<id>.json`. Files are replaced
//! by writing a sibling temp file and renaming it into place, so a
//! reader never sees a half-written record.

use crate::store::{StoreError, TriggerStore, Versioned};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use trig_core::{Trigger, TriggerId};

const KIND: &str = "triggers";

#[derive(Serialize, Deserialize)]
struct Record {
    revision: u64,
    trigger: Trigger,
}

/// JSON file-based trigger store.
///
/// Revision checks are serialized through a lock shared by all clones, so
/// compare-and-put is atomic among writers in the same process.
#[derive(Clone)]
pub struct JsonStore {
    base_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    /// Open a store at the given path
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        fs::create_dir_all(base_path.join(KIND))?;
        Ok(Self {
            base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Ids become file names, so only `[A-Za-z0-9_.-]` is allowed and a
    /// leading dot is rejected.
    fn path_for(&self, id: &TriggerId) -> Result<PathBuf, StoreError> {
        let name = id.as_str();
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidId(id.clone()));
        }
        Ok(self.base_path.join(KIND).join(format!("{name}.json")))
    }

    fn read(&self, id: &TriggerId) -> Result<Option<Record>, StoreError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write(&self, record: &Record) -> Result<(), StoreError> {
        let path = self.path_for(record.trigger.id())?;
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TriggerStore for JsonStore {
    fn get(&self, id: &TriggerId) -> Result<Versioned<Trigger>, StoreError> {
        let record = self
            .read(id)?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(Versioned {
            revision: record.revision,
            value: record.trigger,
        })
    }

    fn put(&self, trigger: &Trigger) -> Result<u64, StoreError> {
        let _guard = self.lock();
        let revision = self.read(trigger.id())?.map_or(1, |r| r.revision + 1);
        self.write(&Record {
            revision,
            trigger: trigger.clone(),
        })?;
        tracing::debug!(trigger_id = %trigger.id(), revision, "trigger stored");
        Ok(revision)
    }

    fn compare_and_put(&self, trigger: &Trigger, expected: u64) -> Result<u64, StoreError> {
        let _guard = self.lock();
        let current = self
            .read(trigger.id())?
            .ok_or_else(|| StoreError::NotFound(trigger.id().clone()))?;
        if current.revision != expected {
            return Err(StoreError::Conflict {
                id: trigger.id().clone(),
                expected,
                actual: current.revision,
            });
        }
        let revision = expected + 1;
        self.write(&Record {
            revision,
            trigger: trigger.clone(),
        })?;
        tracing::debug!(trigger_id = %trigger.id(), revision, "trigger updated");
        Ok(revision)
    }

    fn delete(&self, id: &TriggerId) -> Result<(), StoreError> {
        let _guard = self.lock();
        let path = self.path_for(id)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<TriggerId>, StoreError> {
        let dir = self.base_path.join(KIND);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    ids.push(TriggerId::new(stem.to_string_lossy()));
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
