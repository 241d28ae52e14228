// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::alert::{AlertError, AlertService};
use crate::policy::PolicyDirectory;
use async_trait::async_trait;
use std::time::Instant;
use tracing::Instrument;
use trig_core::{AlertRule, PolicyId};

/// Wrapper that adds tracing to any AlertService
#[derive(Clone)]
pub struct TracedAlertService<A> {
    inner: A,
}

impl<A> TracedAlertService<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: AlertService> AlertService for TracedAlertService<A> {
    async fn create_alert_rule(&self, rule: &AlertRule) -> Result<String, AlertError> {
        let span = tracing::info_span!("alert.create_rule", name = %rule.name);
        async {
            tracing::info!(
                measurement = %rule.measurement,
                field = %rule.field,
                period_secs = rule.period_secs,
                "creating alert rule"
            );

            let start = Instant::now();
            let result = self.inner.create_alert_rule(rule).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(rule_id) => tracing::info!(rule_id, elapsed_ms, "alert rule created"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_alert_rule(&self, rule_id: &str) -> Result<(), AlertError> {
        let span = tracing::info_span!("alert.delete_rule", rule_id);
        async {
            let start = Instant::now();
            let result = self.inner.delete_alert_rule(rule_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "alert rule deleted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "delete failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn attach_notification(
        &self,
        rule_id: &str,
        channel_id: &str,
        policy_id: &PolicyId,
    ) -> Result<(), AlertError> {
        let span = tracing::info_span!(
            "alert.attach",
            rule_id,
            channel_id,
            policy_id = %policy_id
        );
        async {
            let start = Instant::now();
            let result = self
                .inner
                .attach_notification(rule_id, channel_id, policy_id)
                .await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "notification attached"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "attach failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn find_notification_channel(&self, name: &str) -> Result<Option<String>, AlertError> {
        let result = self.inner.find_notification_channel(name).await;
        tracing::debug!(name, found = ?result.as_ref().ok(), "looked up channel");
        result
    }

    async fn create_notification_channel(&self, name: &str) -> Result<String, AlertError> {
        let span = tracing::info_span!("alert.create_channel", name);
        async {
            let result = self.inner.create_notification_channel(name).await;
            match &result {
                Ok(channel_id) => tracing::info!(channel_id, "notification channel created"),
                Err(e) => tracing::error!(error = %e, "channel create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any PolicyDirectory
#[derive(Clone)]
pub struct TracedPolicyDirectory<P> {
    inner: P,
}

impl<P> TracedPolicyDirectory<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PolicyDirectory> PolicyDirectory for TracedPolicyDirectory<P> {
    async fn policy_name(&self, policy_id: &PolicyId) -> Option<String> {
        let name = self.inner.policy_name(policy_id).await;
        tracing::trace!(policy_id = %policy_id, found = name.is_some(), "looked up policy");
        name
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
