// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine tuning

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for provisioning and observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on each call to the alerting service
    #[serde(with = "humantime_serde")]
    pub provision_timeout: Duration,
    /// How many times an observation is retried after losing a revision race
    pub conflict_retries: u32,
    /// Notification channel alert rules report through; created on first use
    pub notification_channel_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provision_timeout: Duration::from_secs(10),
            conflict_retries: 3,
            notification_channel_name: "as-default".to_string(),
        }
    }
}
