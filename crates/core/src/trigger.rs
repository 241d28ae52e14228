// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Uniform view over both trigger kinds

use crate::alarm::{AlarmInput, AlarmSpec, AlarmTrigger};
use crate::error::ValidationError;
use crate::id::{PolicyId, TriggerId};
use crate::timer::{TimerInput, TimerSpec, TimerTrigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Timer,
    Alarm,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Timer => write!(f, "timer"),
            TriggerKind::Alarm => write!(f, "alarm"),
        }
    }
}

/// Creation input for either trigger kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trigger_type", rename_all = "snake_case")]
pub enum TriggerInput {
    Timer(TimerInput),
    Alarm(AlarmInput),
}

impl TriggerInput {
    pub fn validate(self, now: DateTime<Utc>) -> Result<TriggerSpec, ValidationError> {
        match self {
            TriggerInput::Timer(input) => input.validate(now).map(TriggerSpec::Timer),
            TriggerInput::Alarm(input) => input.validate().map(TriggerSpec::Alarm),
        }
    }
}

/// Validated definition of either trigger kind
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerSpec {
    Timer(TimerSpec),
    Alarm(AlarmSpec),
}

impl TriggerSpec {
    pub fn into_trigger(self, id: TriggerId, policy_id: PolicyId) -> Trigger {
        match self {
            TriggerSpec::Timer(spec) => Trigger::Timer(TimerTrigger::new(id, policy_id, spec)),
            TriggerSpec::Alarm(spec) => Trigger::Alarm(AlarmTrigger::new(id, policy_id, spec)),
        }
    }
}

/// A trigger of either kind; the unit of persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    Timer(TimerTrigger),
    Alarm(AlarmTrigger),
}

impl Trigger {
    pub fn id(&self) -> &TriggerId {
        match self {
            Trigger::Timer(t) => &t.id,
            Trigger::Alarm(a) => &a.id,
        }
    }

    pub fn policy_id(&self) -> &PolicyId {
        match self {
            Trigger::Timer(t) => &t.policy_id,
            Trigger::Alarm(a) => &a.policy_id,
        }
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            Trigger::Timer(_) => TriggerKind::Timer,
            Trigger::Alarm(_) => TriggerKind::Alarm,
        }
    }

    /// Whether the trigger is still live: a timer that has not expired, or an
    /// alarm with a provisioned alert rule. Streaks only move through
    /// [`AlarmTrigger::observe`].
    pub fn is_trigger(&self) -> bool {
        match self {
            Trigger::Timer(t) => t.is_trigger(),
            Trigger::Alarm(a) => a.is_trigger(),
        }
    }

    pub fn describe(&self, policy_name: &str) -> String {
        match self {
            Trigger::Timer(t) => t.describe(policy_name),
            Trigger::Alarm(a) => a.describe(policy_name),
        }
    }

    pub fn as_timer(&self) -> Option<&TimerTrigger> {
        match self {
            Trigger::Timer(t) => Some(t),
            Trigger::Alarm(_) => None,
        }
    }

    pub fn as_alarm(&self) -> Option<&AlarmTrigger> {
        match self {
            Trigger::Alarm(a) => Some(a),
            Trigger::Timer(_) => None,
        }
    }
}

impl From<TimerTrigger> for Trigger {
    fn from(t: TimerTrigger) -> Self {
        Trigger::Timer(t)
    }
}

impl From<AlarmTrigger> for Trigger {
    fn from(a: AlarmTrigger) -> Self {
        Trigger::Alarm(a)
    }
}

/// Reported when a trigger decides something downstream should react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TriggerEvent {
    /// The owning policy should execute
    Fired {
        trigger_id: TriggerId,
        policy_id: PolicyId,
        kind: TriggerKind,
        at: DateTime<Utc>,
    },
    /// A timer left its validity window and will not fire again
    Expired {
        trigger_id: TriggerId,
        policy_id: PolicyId,
        at: DateTime<Utc>,
    },
}

impl TriggerEvent {
    pub fn fired(trigger: &Trigger, at: DateTime<Utc>) -> Self {
        TriggerEvent::Fired {
            trigger_id: trigger.id().clone(),
            policy_id: trigger.policy_id().clone(),
            kind: trigger.kind(),
            at,
        }
    }

    /// Event name for logging and matching
    pub fn name(&self) -> &'static str {
        match self {
            TriggerEvent::Fired { .. } => "trigger:fired",
            TriggerEvent::Expired { .. } => "trigger:expired",
        }
    }

    pub fn trigger_id(&self) -> &TriggerId {
        match self {
            TriggerEvent::Fired { trigger_id, .. } | TriggerEvent::Expired { trigger_id, .. } => {
                trigger_id
            }
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
