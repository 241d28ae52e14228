// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic evaluation of timer triggers

use chrono::{DateTime, Utc};
use trig_core::{Trigger, TriggerEvent, TriggerId, TriggerKind};
use trig_storage::{StoreError, TriggerStore, Versioned};

/// Walks every stored timer on each tick, firing the due ones
pub struct TimerPoller<S> {
    store: S,
}

impl<S: TriggerStore> TimerPoller<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Evaluate all active timers at `now`.
    ///
    /// A due timer fires once and is moved past `now`; the rest have their
    /// next fire time refreshed. Per-trigger failures are logged and do not
    /// stop the tick.
    pub fn tick(&self, now: DateTime<Utc>) -> Vec<TriggerEvent> {
        let ids = match self.store.list() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(error = %e, "failed to list triggers");
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        for id in ids {
            match self.tick_one(&id, now) {
                Ok(mut produced) => events.append(&mut produced),
                Err(e) => tracing::warn!(trigger_id = %id, error = %e, "failed to load timer"),
            }
        }
        events
    }

    fn tick_one(&self, id: &TriggerId, now: DateTime<Utc>) -> Result<Vec<TriggerEvent>, StoreError> {
        let Versioned { revision, value } = match self.store.get(id) {
            Ok(record) => record,
            // Unregistered since the listing
            Err(StoreError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let Trigger::Timer(mut timer) = value else {
            return Ok(Vec::new());
        };
        if !timer.is_trigger() {
            return Ok(Vec::new());
        }

        let before = timer.clone();
        let mut events = Vec::new();
        if timer.is_due(now) {
            tracing::info!(
                trigger_id = %timer.id,
                policy_id = %timer.policy_id,
                scheduled = ?timer.next_fire_time,
                "timer fired"
            );
            events.push(TriggerEvent::Fired {
                trigger_id: timer.id.clone(),
                policy_id: timer.policy_id.clone(),
                kind: TriggerKind::Timer,
                at: now,
            });
            timer.advance_past(now);
        } else {
            timer.update(now);
        }

        if timer.is_expired {
            tracing::info!(trigger_id = %timer.id, "timer expired");
            events.push(TriggerEvent::Expired {
                trigger_id: timer.id.clone(),
                policy_id: timer.policy_id.clone(),
                at: now,
            });
        }

        if timer != before {
            if let Err(e) = self
                .store
                .compare_and_put(&Trigger::Timer(timer), revision)
            {
                tracing::error!(trigger_id = %id, error = %e, "failed to persist timer");
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
