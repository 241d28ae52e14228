// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trig-storage: versioned persistence for triggers
//!
//! Every stored trigger carries a revision. Writers that read a trigger,
//! change it and write it back use [`TriggerStore::compare_and_put`] so two
//! evaluators working on the same trigger cannot lose each other's update.

mod json;
mod memory;
mod store;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use store::{StoreError, TriggerStore, Versioned};
