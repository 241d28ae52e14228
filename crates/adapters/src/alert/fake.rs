// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake alert service for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AlertError, AlertService};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trig_core::{AlertRule, PolicyId};

/// Operation kinds, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertOp {
    CreateRule,
    DeleteRule,
    Attach,
    FindChannel,
    CreateChannel,
}

/// Recorded alert service call
#[derive(Debug, Clone, PartialEq)]
pub enum AlertCall {
    CreateRule { rule: AlertRule },
    DeleteRule { rule_id: String },
    Attach {
        rule_id: String,
        channel_id: String,
        policy_id: PolicyId,
    },
    FindChannel { name: String },
    CreateChannel { name: String },
}

#[derive(Default)]
struct FakeAlertState {
    rules: HashMap<String, AlertRule>,
    channels: HashMap<String, String>,
    attachments: HashMap<String, (String, PolicyId)>,
    failing: HashSet<AlertOp>,
    delay: Option<Duration>,
    next_id: u64,
    calls: Vec<AlertCall>,
}

/// Fake alert service for testing
#[derive(Clone, Default)]
pub struct FakeAlertService {
    inner: Arc<Mutex<FakeAlertState>>,
}

impl FakeAlertService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `op` fail until cleared
    pub fn fail_on(&self, op: AlertOp) {
        self.lock().failing.insert(op);
    }

    pub fn clear_failures(&self) {
        self.lock().failing.clear();
    }

    /// Delay every call by `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// Pre-create a notification channel
    pub fn add_channel(&self, name: &str, id: &str) {
        self.lock()
            .channels
            .insert(name.to_string(), id.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<AlertCall> {
        self.lock().calls.clone()
    }

    pub fn rule(&self, rule_id: &str) -> Option<AlertRule> {
        self.lock().rules.get(rule_id).cloned()
    }

    pub fn rule_count(&self) -> usize {
        self.lock().rules.len()
    }

    pub fn channel_count(&self) -> usize {
        self.lock().channels.len()
    }

    /// Channel and policy a rule is attached to
    pub fn attachment(&self, rule_id: &str) -> Option<(String, PolicyId)> {
        self.lock().attachments.get(rule_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeAlertState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a call, then wait out any configured delay
    async fn enter(&self, op: AlertOp, call: AlertCall) -> Result<(), AlertError> {
        let (delay, failing) = {
            let mut state = self.lock();
            state.calls.push(call);
            (state.delay, state.failing.contains(&op))
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(AlertError::Unavailable(format!("injected failure: {op:?}")));
        }
        Ok(())
    }
}

#[async_trait]
impl AlertService for FakeAlertService {
    async fn create_alert_rule(&self, rule: &AlertRule) -> Result<String, AlertError> {
        self.enter(AlertOp::CreateRule, AlertCall::CreateRule { rule: rule.clone() })
            .await?;

        let mut state = self.lock();
        state.next_id += 1;
        let id = format!("rule-{}", state.next_id);
        state.rules.insert(id.clone(), rule.clone());
        Ok(id)
    }

    async fn delete_alert_rule(&self, rule_id: &str) -> Result<(), AlertError> {
        self.enter(
            AlertOp::DeleteRule,
            AlertCall::DeleteRule {
                rule_id: rule_id.to_string(),
            },
        )
        .await?;

        let mut state = self.lock();
        state.attachments.remove(rule_id);
        state
            .rules
            .remove(rule_id)
            .map(|_| ())
            .ok_or_else(|| AlertError::RuleNotFound(rule_id.to_string()))
    }

    async fn attach_notification(
        &self,
        rule_id: &str,
        channel_id: &str,
        policy_id: &PolicyId,
    ) -> Result<(), AlertError> {
        self.enter(
            AlertOp::Attach,
            AlertCall::Attach {
                rule_id: rule_id.to_string(),
                channel_id: channel_id.to_string(),
                policy_id: policy_id.clone(),
            },
        )
        .await?;

        let mut state = self.lock();
        if !state.rules.contains_key(rule_id) {
            return Err(AlertError::RuleNotFound(rule_id.to_string()));
        }
        if !state.channels.values().any(|id| id == channel_id) {
            return Err(AlertError::ChannelNotFound(channel_id.to_string()));
        }
        state.attachments.insert(
            rule_id.to_string(),
            (channel_id.to_string(), policy_id.clone()),
        );
        Ok(())
    }

    async fn find_notification_channel(&self, name: &str) -> Result<Option<String>, AlertError> {
        self.enter(
            AlertOp::FindChannel,
            AlertCall::FindChannel {
                name: name.to_string(),
            },
        )
        .await?;

        Ok(self.lock().channels.get(name).cloned())
    }

    async fn create_notification_channel(&self, name: &str) -> Result<String, AlertError> {
        self.enter(
            AlertOp::CreateChannel,
            AlertCall::CreateChannel {
                name: name.to_string(),
            },
        )
        .await?;

        let mut state = self.lock();
        if state.channels.contains_key(name) {
            return Err(AlertError::Rejected(format!("channel exists: {name}")));
        }
        state.next_id += 1;
        let id = format!("channel-{}", state.next_id);
        state.channels.insert(name.to_string(), id.clone());
        Ok(id)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
