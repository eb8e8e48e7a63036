//! # Error Types — Structured Error Hierarchy
//!
//! Defines the foundation-level error type used throughout the workflow
//! core. All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. Higher crates define their own enums (registry,
//! pipeline, dispatcher) and wrap this one where they need to.

use thiserror::Error;

/// Top-level error type for foundation types.
#[derive(Error, Debug)]
pub enum CaseflowError {
    /// A case identifier failed validation.
    #[error("invalid case reference: {0}")]
    InvalidCaseId(String),

    /// A state name did not match any member of the enumeration.
    #[error("unknown case state: {0:?}")]
    UnknownState(String),

    /// A role name did not match any known role.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// A permission level name did not match the lattice.
    #[error("unknown permission level: {0:?}")]
    UnknownPermission(String),

    /// An environment name was not recognised.
    #[error("unknown environment: {0:?}")]
    UnknownEnvironment(String),

    /// A party name was neither applicant 1 nor applicant 2.
    #[error("unknown party: {0:?}")]
    UnknownParty(String),

    /// A timestamp could not be parsed or was not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
