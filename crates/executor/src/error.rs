//! Error types for command execution.
//!
//! All failures of an invocation are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields naming the operation and,
//!   where relevant, the record name or transient key involved
//! - **Serializable**: Can be converted to/from JSON and travel inside a
//!   [`Response`](crate::Response)
//! - **Distinguishable**: Callers can tell "does not exist" from "malformed
//!   input" from "already exists" through [`Error::kind`] alone

use serde::{Deserialize, Serialize};

/// Invocation failures.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Input | `MissingTransientKey`, `EmptyTransientValue`, `MalformedInput`, `InvalidField`, `InvalidArguments` | Bad caller input |
/// | Keys | `InvalidAttribute` | Reserved characters in key material |
/// | State | `AlreadyExists`, `NotFound`, `CorruptRecord` | Store contents disagree with the request |
/// | Dispatch | `UnknownOperation` | No such operation |
/// | Store | `IterationError`, `StoreFailure`, `Conflict` | Lower-layer failures |
/// | System | `Serialization`, `InvalidConfig` | Infrastructure errors |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Input ====================
    /// The transient map has no entry for the required key
    #[error("{operation}: {key} must be a key in the transient map")]
    MissingTransientKey { operation: String, key: String },

    /// The transient entry exists but is zero-length
    #[error("{operation}: {key} value in the transient map must be a non-empty JSON string")]
    EmptyTransientValue { operation: String, key: String },

    /// The transient entry could not be decoded into the expected shape
    #[error("{operation}: failed to decode JSON of {key}: {reason}")]
    MalformedInput {
        operation: String,
        key: String,
        reason: String,
    },

    /// A decoded field violates its constraint
    ///
    /// `name` is the record the field belongs to, empty when the name
    /// itself is the offending field.
    #[error("{operation}: {field} field{} {reason}", of_record(.name))]
    InvalidField {
        operation: String,
        name: String,
        field: String,
        reason: String,
    },

    /// Wrong number of positional arguments
    #[error("{operation}: incorrect number of arguments, expecting {expected}, got {actual}")]
    InvalidArguments {
        operation: String,
        expected: String,
        actual: usize,
    },

    // ==================== Keys ====================
    /// An index attribute or query bound contains reserved characters
    #[error("{operation}: invalid attribute: {reason}")]
    InvalidAttribute { operation: String, reason: String },

    // ==================== State ====================
    /// Create found an existing public record
    #[error("{operation}: this {entity} already exists: {name}")]
    AlreadyExists {
        operation: String,
        entity: String,
        name: String,
    },

    /// The requested record is absent
    #[error("{operation}: {record} does not exist: {name}")]
    NotFound {
        operation: String,
        record: String,
        name: String,
    },

    /// A stored value could not be decoded
    #[error("{operation}: stored record {name} is corrupt: {reason}")]
    CorruptRecord {
        operation: String,
        name: String,
        reason: String,
    },

    // ==================== Dispatch ====================
    /// Operation name not recognized
    #[error("received unknown function invocation: {function}")]
    UnknownOperation { function: String },

    // ==================== Store ====================
    /// A range scan failed while yielding an item
    #[error("{operation}: iteration failed: {reason}")]
    IterationError { operation: String, reason: String },

    /// Any other lower-layer store failure
    #[error("{operation}: store failure: {reason}")]
    StoreFailure { operation: String, reason: String },

    /// The host rejected the invocation at commit time
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    // ==================== System ====================
    /// Output could not be serialized
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Configuration is unusable
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

fn of_record(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!(" of {}", name)
    }
}

impl Error {
    /// Stable machine-readable code for the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingTransientKey { .. } => "missing_transient_key",
            Error::EmptyTransientValue { .. } => "empty_transient_value",
            Error::MalformedInput { .. } => "malformed_input",
            Error::InvalidField { .. } => "invalid_field",
            Error::InvalidArguments { .. } => "invalid_arguments",
            Error::InvalidAttribute { .. } => "invalid_attribute",
            Error::AlreadyExists { .. } => "already_exists",
            Error::NotFound { .. } => "not_found",
            Error::CorruptRecord { .. } => "corrupt_record",
            Error::UnknownOperation { .. } => "unknown_operation",
            Error::IterationError { .. } => "iteration_error",
            Error::StoreFailure { .. } => "store_failure",
            Error::Conflict { .. } => "conflict",
            Error::Serialization { .. } => "serialization",
            Error::InvalidConfig { .. } => "invalid_config",
        }
    }

    /// Whether the host discarded the invocation because of a concurrent commit
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}
