//! Concurrency layer for privreg
//!
//! This crate plays the part of the host ledger around one invocation:
//! - TransactionContext: invocation-scoped `CollectionStore` with read-set,
//!   range-read tracking and buffered writes
//! - Validation: first-committer-wins conflict detection at commit time
//! - TransactionManager: begin/commit/abort with all-or-nothing application
//!
//! Handlers running inside a context never see a commit point of their own;
//! every write they issue becomes visible together or not at all.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;
pub mod validation;

pub use manager::TransactionManager;
pub use transaction::{CommitError, RangeRead, TransactionContext, TransactionStatus};
pub use validation::{validate_transaction, ConflictType, ValidationResult};
