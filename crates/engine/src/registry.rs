// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger registry: validation, registration and teardown
//!
//! Registering an alarm provisions an alert rule in the alerting service and
//! routes it through the autoscaler's notification channel. Any external
//! state created before a later step fails is deleted again before the
//! error is reported.

use crate::config::EngineConfig;
use crate::error::{EngineError, ProvisionError};
use std::future::Future;
use trig_adapters::{AlertError, AlertService, PolicyDirectory};
use trig_core::{
    AlarmTrigger, Clock, IdGen, PolicyId, Trigger, TriggerId, TriggerInput, TriggerSpec,
};
use trig_storage::TriggerStore;

/// Registry adapter dependencies
pub struct RegistryDeps<S, A, P> {
    pub store: S,
    pub alerts: A,
    pub policies: P,
}

/// Owns the lifecycle of triggers from creation to teardown
pub struct TriggerRegistry<S, A, P, C: Clock, I: IdGen> {
    store: S,
    alerts: A,
    policies: P,
    clock: C,
    id_gen: I,
    config: EngineConfig,
}

impl<S, A, P, C, I> TriggerRegistry<S, A, P, C, I>
where
    S: TriggerStore,
    A: AlertService,
    P: PolicyDirectory,
    C: Clock,
    I: IdGen,
{
    pub fn new(deps: RegistryDeps<S, A, P>, clock: C, id_gen: I, config: EngineConfig) -> Self {
        Self {
            store: deps.store,
            alerts: deps.alerts,
            policies: deps.policies,
            clock,
            id_gen,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check creation input against the current time
    pub fn validate(&self, input: TriggerInput) -> Result<TriggerSpec, EngineError> {
        Ok(input.validate(self.clock.now())?)
    }

    /// Validate input, assign a fresh id and register the result
    pub async fn create(
        &self,
        policy_id: PolicyId,
        input: TriggerInput,
    ) -> Result<Trigger, EngineError> {
        let spec = self.validate(input)?;
        let trigger = spec.into_trigger(self.id_gen.next_trigger_id(), policy_id);
        self.register(trigger).await
    }

    /// Persist a trigger, provisioning external state for alarms.
    ///
    /// Returns the trigger as stored: timers carry their first fire time,
    /// alarms the id of their alert rule.
    pub async fn register(&self, trigger: Trigger) -> Result<Trigger, EngineError> {
        match trigger {
            Trigger::Timer(mut timer) => {
                let status = timer.update_now(&self.clock);
                let trigger = Trigger::Timer(timer);
                self.store.put(&trigger)?;
                tracing::info!(
                    trigger_id = %trigger.id(),
                    policy_id = %trigger.policy_id(),
                    ?status,
                    "timer registered"
                );
                Ok(trigger)
            }
            Trigger::Alarm(alarm) => self.register_alarm(alarm).await,
        }
    }

    async fn register_alarm(&self, mut alarm: AlarmTrigger) -> Result<Trigger, EngineError> {
        if self.policies.policy_name(&alarm.policy_id).await.is_none() {
            return Err(EngineError::PolicyNotFound(alarm.policy_id.clone()));
        }
        let rule = alarm.alert_rule()?;
        let channel_id = self.notification_channel().await?;

        let rule_id = self
            .provision("create_alert_rule", self.alerts.create_alert_rule(&rule))
            .await?;

        let attached = self
            .provision(
                "attach_notification",
                self.alerts
                    .attach_notification(&rule_id, &channel_id, &alarm.policy_id),
            )
            .await;
        if let Err(e) = attached {
            self.roll_back(&rule_id).await;
            return Err(e);
        }

        alarm.alert_id = Some(rule_id.clone());
        let trigger = Trigger::Alarm(alarm);
        if let Err(e) = self.store.put(&trigger) {
            self.roll_back(&rule_id).await;
            return Err(e.into());
        }

        tracing::info!(
            trigger_id = %trigger.id(),
            policy_id = %trigger.policy_id(),
            rule_id,
            "alarm registered"
        );
        Ok(trigger)
    }

    /// Remove a trigger, deleting its alert rule first for alarms.
    ///
    /// If the alert rule cannot be deleted the trigger stays stored so the
    /// caller can retry.
    pub async fn unregister(&self, id: &TriggerId) -> Result<(), EngineError> {
        let trigger = self.store.get(id)?.value;

        if let Some(rule_id) = trigger.as_alarm().and_then(|a| a.alert_id.as_deref()) {
            let deleted = self
                .provision("delete_alert_rule", self.alerts.delete_alert_rule(rule_id))
                .await;
            match deleted {
                Ok(()) => {}
                Err(EngineError::ExternalProvisioning {
                    source: ProvisionError::Alert(AlertError::RuleNotFound(_)),
                    ..
                }) => {
                    tracing::warn!(trigger_id = %id, rule_id, "alert rule already gone");
                }
                Err(e) => return Err(e),
            }
        }

        self.store.delete(id)?;
        tracing::info!(trigger_id = %id, kind = %trigger.kind(), "trigger unregistered");
        Ok(())
    }

    pub fn get(&self, id: &TriggerId) -> Result<Trigger, EngineError> {
        Ok(self.store.get(id)?.value)
    }

    pub fn list(&self) -> Result<Vec<TriggerId>, EngineError> {
        Ok(self.store.list()?)
    }

    /// Human-readable summary naming the owning policy
    pub async fn describe(&self, id: &TriggerId) -> Result<String, EngineError> {
        let trigger = self.store.get(id)?.value;
        let name = self
            .policies
            .policy_name(trigger.policy_id())
            .await
            .unwrap_or_else(|| trigger.policy_id().to_string());
        Ok(trigger.describe(&name))
    }

    /// Find the autoscaler's notification channel, creating it if missing
    async fn notification_channel(&self) -> Result<String, EngineError> {
        let name = self.config.notification_channel_name.as_str();
        let found = self
            .provision(
                "find_notification_channel",
                self.alerts.find_notification_channel(name),
            )
            .await?;
        match found {
            Some(channel_id) => Ok(channel_id),
            None => {
                self.provision(
                    "create_notification_channel",
                    self.alerts.create_notification_channel(name),
                )
                .await
            }
        }
    }

    async fn roll_back(&self, rule_id: &str) {
        let result = self
            .provision("delete_alert_rule", self.alerts.delete_alert_rule(rule_id))
            .await;
        match result {
            Ok(()) => tracing::info!(rule_id, "rolled back alert rule"),
            Err(e) => tracing::error!(rule_id, error = %e, "rollback failed, alert rule orphaned"),
        }
    }

    /// Run one alerting call under the provisioning timeout
    async fn provision<T>(
        &self,
        step: &'static str,
        call: impl Future<Output = Result<T, AlertError>>,
    ) -> Result<T, EngineError> {
        let timeout = self.config.provision_timeout;
        let source = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => ProvisionError::Alert(e),
            Err(_) => ProvisionError::TimedOut(timeout.into()),
        };
        Err(EngineError::ExternalProvisioning { step, source })
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
