//! Error conversion from lower-layer error types.
//!
//! Store, key and codec failures carry no operation context of their own,
//! so each helper takes the operation name and returns a closure suitable
//! for `map_err`.

use privreg_concurrency::CommitError;
use privreg_core::{CodecError, KeyError, StoreError};

use crate::Error;

/// Map a store failure; scan failures become [`Error::IterationError`].
pub(crate) fn store_failure(operation: &'static str) -> impl Fn(StoreError) -> Error {
    move |err| {
        if err.is_iteration() {
            Error::IterationError {
                operation: operation.to_string(),
                reason: err.to_string(),
            }
        } else {
            Error::StoreFailure {
                operation: operation.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Map a failure yielded by a range-scan item; every such failure aborts the scan.
pub(crate) fn iteration_failure(operation: &'static str) -> impl Fn(StoreError) -> Error {
    move |err| Error::IterationError {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
}

/// Map a composite-key failure
pub(crate) fn invalid_attribute(operation: &'static str) -> impl Fn(KeyError) -> Error {
    move |err| Error::InvalidAttribute {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
}

/// Map a failure to decode a stored value
pub(crate) fn corrupt_record<'a>(
    operation: &'static str,
    name: &'a str,
) -> impl Fn(CodecError) -> Error + 'a {
    move |err| Error::CorruptRecord {
        operation: operation.to_string(),
        name: name.to_string(),
        reason: err.to_string(),
    }
}

/// Map a failure to encode a record or output
pub(crate) fn serialization<E: std::fmt::Display>(err: E) -> Error {
    Error::Serialization {
        reason: err.to_string(),
    }
}

/// Map a commit rejection from the host ledger
pub(crate) fn commit_failure(operation: &str, err: CommitError) -> Error {
    if err.is_conflict() {
        Error::Conflict {
            reason: format!("{} was rejected at commit: {}", operation, err),
        }
    } else {
        Error::StoreFailure {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}
