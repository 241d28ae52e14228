// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the trigger engine

use thiserror::Error;
use trig_adapters::AlertError;
use trig_core::{PolicyId, TriggerId, TriggerKind, ValidationError};
use trig_storage::StoreError;

/// Why a call to the alerting service did not succeed
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error("timed out after {0}")]
    TimedOut(humantime::Duration),
}

/// Errors that can occur in the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid trigger: {0}")]
    Validation(#[from] ValidationError),
    #[error("trigger not found: {0}")]
    TriggerNotFound(TriggerId),
    #[error("policy not found: {0}")]
    PolicyNotFound(PolicyId),
    #[error("external provisioning failed at {step}: {source}")]
    ExternalProvisioning {
        step: &'static str,
        source: ProvisionError,
    },
    #[error("persistence error: {0}")]
    Persistence(StoreError),
    #[error("trigger {id} is not a {expected} trigger")]
    WrongKind { id: TriggerId, expected: TriggerKind },
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => EngineError::TriggerNotFound(id),
            other => EngineError::Persistence(other),
        }
    }
}
