//! Transaction validation for OCC
//!
//! Rules:
//! - First-committer-wins based on what the invocation READ, not what it wrote
//! - Blind writes (write without read) do NOT conflict
//! - A range scan conflicts if re-running it against current storage would
//!   yield a different set of committed keys or versions (phantoms included)

use privreg_core::StoreResult;
use privreg_storage::MemoryStore;

use crate::transaction::{RangeRead, TransactionContext};

/// Types of conflicts that can occur during transaction validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictType {
    /// A key was read at one version but its current version differs
    ReadWriteConflict {
        /// Collection of the key
        collection: String,
        /// The key that has a conflict
        key: String,
        /// Version recorded when read (0 = absent)
        read_version: u64,
        /// Current version at validation time (0 = absent)
        current_version: u64,
    },

    /// A range scan would now return different committed entries
    PhantomConflict {
        /// Collection of the range
        collection: String,
        /// Inclusive start key
        start: String,
        /// Exclusive end key
        end: String,
    },
}

/// Result of transaction validation
///
/// A transaction commits only if `is_valid()` returns true.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// All conflicts detected during validation
    pub conflicts: Vec<ConflictType>,
}

impl ValidationResult {
    /// A successful validation result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of conflicts
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }
}

fn validate_range(range: &RangeRead, store: &MemoryStore) -> StoreResult<Option<ConflictType>> {
    let current: Vec<(String, u64)> = store
        .scan(&range.collection, &range.start, &range.end)?
        .into_iter()
        .map(|(k, sv)| (k, sv.version()))
        .collect();
    if current == range.observed {
        return Ok(None);
    }
    Ok(Some(ConflictType::PhantomConflict {
        collection: range.collection.clone(),
        start: range.start.clone(),
        end: range.end.clone(),
    }))
}

/// Validate a transaction's reads against current storage
///
/// Storage errors abort validation; a partially validated transaction must
/// never be treated as valid.
pub fn validate_transaction(txn: &TransactionContext, store: &MemoryStore) -> StoreResult<ValidationResult> {
    let mut result = ValidationResult::ok();

    for ((collection, key), read_version) in &txn.read_set {
        let current_version = store.version_of(collection, key)?;
        if current_version != *read_version {
            result.conflicts.push(ConflictType::ReadWriteConflict {
                collection: collection.clone(),
                key: key.clone(),
                read_version: *read_version,
                current_version,
            });
        }
    }

    for range in &txn.range_reads {
        if let Some(conflict) = validate_range(range, store)? {
            result.conflicts.push(conflict);
        }
    }

    Ok(result)
}
