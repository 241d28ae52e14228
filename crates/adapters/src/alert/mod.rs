// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alerting service adapters
//!
//! The alerting service evaluates metric rules and notifies the autoscaler
//! through a notification channel each cycle a rule's condition holds.

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AlertCall, AlertOp, FakeAlertService};

use async_trait::async_trait;
use thiserror::Error;
use trig_core::{AlertRule, PolicyId};

/// Errors from alerting service operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    #[error("alert rule not found: {0}")]
    RuleNotFound(String),
    #[error("notification channel not found: {0}")]
    ChannelNotFound(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Adapter for the external alerting service
#[async_trait]
pub trait AlertService: Clone + Send + Sync + 'static {
    /// Create a metric alert rule, returning its id
    async fn create_alert_rule(&self, rule: &AlertRule) -> Result<String, AlertError>;

    async fn delete_alert_rule(&self, rule_id: &str) -> Result<(), AlertError>;

    /// Route a rule's notifications through a channel, tagged with the policy
    async fn attach_notification(
        &self,
        rule_id: &str,
        channel_id: &str,
        policy_id: &PolicyId,
    ) -> Result<(), AlertError>;

    async fn find_notification_channel(&self, name: &str) -> Result<Option<String>, AlertError>;

    /// Create a notification channel, returning its id
    async fn create_notification_channel(&self, name: &str) -> Result<String, AlertError>;
}
