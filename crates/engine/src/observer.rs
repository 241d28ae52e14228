// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm observations against the store

use crate::config::EngineConfig;
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use trig_core::{Trigger, TriggerEvent, TriggerId, TriggerKind};
use trig_storage::{StoreError, TriggerStore, Versioned};

/// Applies alarm observations as revision-checked read-modify-writes
pub struct AlarmObserver<S> {
    store: S,
    conflict_retries: u32,
}

impl<S: TriggerStore> AlarmObserver<S> {
    pub fn new(store: S, config: &EngineConfig) -> Self {
        Self {
            store,
            conflict_retries: config.conflict_retries,
        }
    }

    /// Record that the alarm condition held for the cycle ending at `now`.
    ///
    /// Returns a `Fired` event when the streak reaches the threshold. A write
    /// that loses a revision race is replayed against the fresh record; once
    /// retries run out, or on any other store failure, the error is logged and
    /// the decision stands.
    pub fn observe(
        &self,
        id: &TriggerId,
        now: DateTime<Utc>,
    ) -> Result<Option<TriggerEvent>, EngineError> {
        let mut attempt = 0;
        loop {
            let Versioned { revision, value } = self.store.get(id)?;
            let Trigger::Alarm(mut alarm) = value else {
                return Err(EngineError::WrongKind {
                    id: id.clone(),
                    expected: TriggerKind::Alarm,
                });
            };

            let observation = alarm.observe(now);
            let trigger = Trigger::Alarm(alarm);

            match self.store.compare_and_put(&trigger, revision) {
                Ok(_) => {}
                Err(StoreError::Conflict { actual, .. }) if attempt < self.conflict_retries => {
                    attempt += 1;
                    tracing::debug!(trigger_id = %id, attempt, actual, "revision conflict, retrying");
                    continue;
                }
                Err(StoreError::NotFound(id)) => return Err(EngineError::TriggerNotFound(id)),
                Err(e) => {
                    tracing::error!(trigger_id = %id, error = %e, "failed to persist observation");
                }
            }

            if !observation.fire {
                return Ok(None);
            }
            tracing::info!(
                trigger_id = %id,
                policy_id = %trigger.policy_id(),
                "alarm fired"
            );
            return Ok(Some(TriggerEvent::fired(&trigger, now)));
        }
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
