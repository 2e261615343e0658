//! Transaction manager for coordinating commit operations
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. Check the context is Active
//! 2. Take the commit lock
//! 3. validate_transaction() - check reads against current storage
//! 4. IF conflicts: abort and return error, nothing applied
//! 5. Allocate commit version
//! 6. apply_batch() - all writes and deletes under one storage write lock
//! 7. Mark committed and return the version
//! ```
//!
//! The commit lock makes steps 3-6 a single critical section, so two
//! invocations that read each other's keys can never both commit.

use std::sync::Arc;

use parking_lot::Mutex;
use privreg_storage::MemoryStore;

use crate::transaction::{CommitError, TransactionContext, TransactionStatus};
use crate::validation::validate_transaction;

/// Manages transaction lifecycle and atomic commits
pub struct TransactionManager {
    store: Arc<MemoryStore>,
    commit_lock: Mutex<()>,
}

impl TransactionManager {
    /// Create a manager over `store`
    pub fn new(store: Arc<MemoryStore>) -> Self {
        TransactionManager {
            store,
            commit_lock: Mutex::new(()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Current committed version
    pub fn current_version(&self) -> u64 {
        self.store.current_version()
    }

    /// Begin a new invocation-scoped transaction
    pub fn begin(&self) -> TransactionContext {
        let txn = TransactionContext::new(self.store.clone());
        tracing::trace!(txn = %txn.txn_id, "begin");
        txn
    }

    /// Commit a transaction atomically
    ///
    /// # Returns
    /// - `Ok(commit_version)` on success
    /// - `Err(CommitError)` if the context is not active, validation finds
    ///   conflicts, or storage fails; no write is applied in any error case
    pub fn commit(&self, txn: &mut TransactionContext) -> Result<u64, CommitError> {
        if txn.status != TransactionStatus::Active {
            return Err(CommitError::InvalidState(format!(
                "transaction {} is {:?}",
                txn.txn_id, txn.status
            )));
        }
        if !Arc::ptr_eq(&self.store, txn.store_arc()) {
            return Err(CommitError::InvalidState(format!(
                "transaction {} belongs to a different store",
                txn.txn_id
            )));
        }

        let _guard = self.commit_lock.lock();

        let validation = match validate_transaction(txn, &self.store) {
            Ok(v) => v,
            Err(e) => {
                txn.mark_aborted(format!("validation read failed: {}", e));
                return Err(CommitError::Storage(e));
            }
        };
        if !validation.is_valid() {
            tracing::debug!(
                txn = %txn.txn_id,
                conflicts = validation.conflict_count(),
                "commit rejected"
            );
            txn.mark_aborted(format!(
                "validation failed: {} conflict(s)",
                validation.conflict_count()
            ));
            return Err(CommitError::ValidationFailed(validation));
        }

        let mutations = txn.mutations();
        if mutations.is_empty() {
            let version = self.store.current_version();
            txn.mark_committed(version);
            return Ok(version);
        }

        let version = self.store.next_version();
        if let Err(e) = self.store.apply_batch(&mutations, version) {
            tracing::error!(txn = %txn.txn_id, version, error = %e, "storage application failed");
            txn.mark_aborted(format!("apply failed: {}", e));
            return Err(CommitError::Storage(e));
        }
        txn.mark_committed(version);
        tracing::trace!(txn = %txn.txn_id, version, writes = mutations.len(), "committed");
        Ok(version)
    }

    /// Explicitly abort a transaction, discarding buffered writes
    pub fn abort(&self, txn: &mut TransactionContext, reason: impl Into<String>) {
        if txn.is_active() {
            txn.mark_aborted(reason);
        }
    }
}
