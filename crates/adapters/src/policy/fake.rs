// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake policy directory for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::PolicyDirectory;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use trig_core::PolicyId;

/// Fake policy directory backed by a map
#[derive(Clone, Default)]
pub struct FakePolicyDirectory {
    policies: Arc<Mutex<HashMap<PolicyId, String>>>,
    lookups: Arc<Mutex<Vec<PolicyId>>>,
}

impl FakePolicyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(self, id: &str, name: &str) -> Self {
        self.insert(id, name);
        self
    }

    pub fn insert(&self, id: &str, name: &str) {
        self.policies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(PolicyId::new(id), name.to_string());
    }

    pub fn remove(&self, id: &str) {
        self.policies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&PolicyId::new(id));
    }

    /// Policy ids looked up so far, in order
    pub fn lookups(&self) -> Vec<PolicyId> {
        self.lookups.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl PolicyDirectory for FakePolicyDirectory {
    async fn policy_name(&self, policy_id: &PolicyId) -> Option<String> {
        self.lookups
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(policy_id.clone());
        self.policies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(policy_id)
            .cloned()
    }
}
