// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store trait and shared types

use thiserror::Error;
use trig_core::{Trigger, TriggerId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trigger not found: {0}")]
    NotFound(TriggerId),
    #[error("invalid trigger id for storage: {0:?}")]
    InvalidId(TriggerId),
    #[error("revision conflict on {id}: expected {expected}, found {actual}")]
    Conflict {
        id: TriggerId,
        expected: u64,
        actual: u64,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A stored value with the revision it was read at
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub revision: u64,
    pub value: T,
}

/// Keyed trigger persistence with optimistic concurrency.
///
/// Revisions start at 1 for a newly stored trigger and increase by one on
/// every successful write.
pub trait TriggerStore: Clone + Send + Sync + 'static {
    fn get(&self, id: &TriggerId) -> Result<Versioned<Trigger>, StoreError>;

    /// Unconditional write; returns the new revision
    fn put(&self, trigger: &Trigger) -> Result<u64, StoreError>;

    /// Write only if the stored revision still equals `expected`.
    ///
    /// Fails with [`StoreError::Conflict`] when another writer got there
    /// first and [`StoreError::NotFound`] when the trigger was deleted.
    fn compare_and_put(&self, trigger: &Trigger, expected: u64) -> Result<u64, StoreError>;

    /// Remove a trigger; deleting a missing trigger is not an error
    fn delete(&self, id: &TriggerId) -> Result<(), StoreError>;

    fn list(&self) -> Result<Vec<TriggerId>, StoreError>;
}
