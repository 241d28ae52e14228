// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external collaborators of the trigger engine

pub mod alert;
pub mod policy;
pub mod traced;

pub use alert::{AlertError, AlertService};
pub use policy::PolicyDirectory;
pub use traced::{TracedAlertService, TracedPolicyDirectory};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use alert::{AlertCall, AlertOp, FakeAlertService};
#[cfg(any(test, feature = "test-support"))]
pub use policy::FakePolicyDirectory;
