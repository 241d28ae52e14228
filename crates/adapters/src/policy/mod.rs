// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policy lookup adapters

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePolicyDirectory;

use async_trait::async_trait;
use trig_core::PolicyId;

/// Read-only view of the scaling policies that own triggers
#[async_trait]
pub trait PolicyDirectory: Clone + Send + Sync + 'static {
    /// Display name of a policy, or `None` if it does not exist
    async fn policy_name(&self, policy_id: &PolicyId) -> Option<String>;
}
