//! Transaction context for OCC
//!
//! `TransactionContext` tracks every read, range read and write issued by
//! one invocation so the manager can validate and apply them at commit time.
//!
//! # Read-Your-Writes Semantics
//!
//! When reading a key, the context checks in order:
//! 1. **write_set**: returns the buffered put, or `None` for a buffered delete
//! 2. **store**: returns the committed value and records its version in `read_set`
//!
//! Range scans merge buffered writes over the committed entries and record
//! the committed `(key, version)` list so phantoms are caught at commit.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use privreg_core::{CollectionStore, KeyValue, RangeIter, StoreError, StoreResult};
use privreg_storage::{MemoryStore, Mutation, StoredValue};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationResult;

/// `(collection, key)` pair identifying one stored value
pub type Slot = (String, String);

/// Commit failures
#[derive(Debug, Clone, Error)]
pub enum CommitError {
    /// Conflicts detected in the read set or range reads
    #[error("commit failed: {} conflict(s)", .0.conflict_count())]
    ValidationFailed(ValidationResult),

    /// The context is not active
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The store rejected validation reads or the batch
    #[error("storage failure during commit: {0}")]
    Storage(#[from] StoreError),
}

impl CommitError {
    /// Whether the failure is a conflict with another committed invocation
    pub fn is_conflict(&self) -> bool {
        matches!(self, CommitError::ValidationFailed(_))
    }
}

/// Status of a transaction in its lifecycle
///
/// `Active` → `Committed` or `Active` → `Aborted`; both are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Reads and writes are accepted
    Active,
    /// Writes were applied with this version
    Committed {
        /// Commit version
        version: u64,
    },
    /// Buffered writes were discarded
    Aborted {
        /// Human-readable reason for abort
        reason: String,
    },
}

/// A range scan observed by the transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRead {
    /// Scanned collection
    pub collection: String,
    /// Inclusive start key
    pub start: String,
    /// Exclusive end key, empty for unbounded
    pub end: String,
    /// Committed keys and versions seen, in scan order
    pub observed: Vec<(String, u64)>,
}

/// Invocation-scoped view of a [`MemoryStore`]
pub struct TransactionContext {
    /// Unique transaction id
    pub txn_id: Uuid,
    store: Arc<MemoryStore>,
    /// Committed versions of keys read (0 = absent when read)
    pub read_set: HashMap<Slot, u64>,
    /// Range scans with the committed entries they observed
    pub range_reads: Vec<RangeRead>,
    /// Buffered puts (`Some`) and deletes (`None`), ordered for determinism
    pub write_set: BTreeMap<Slot, Option<Vec<u8>>>,
    /// Current transaction status
    pub status: TransactionStatus,
}

impl std::fmt::Debug for TransactionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionContext")
            .field("txn_id", &self.txn_id)
            .field("reads", &self.read_set.len())
            .field("range_reads", &self.range_reads.len())
            .field("writes", &self.write_set.len())
            .field("status", &self.status)
            .finish()
    }
}

fn slot(collection: &str, key: &str) -> Slot {
    (collection.to_string(), key.to_string())
}

fn in_range(key: &str, start: &str, end: &str) -> bool {
    key >= start && (end.is_empty() || key < end)
}

impl TransactionContext {
    /// Start an active transaction over `store`
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self::with_id(Uuid::new_v4(), store)
    }

    /// Start an active transaction with an explicit id
    pub fn with_id(txn_id: Uuid, store: Arc<MemoryStore>) -> Self {
        TransactionContext {
            txn_id,
            store,
            read_set: HashMap::new(),
            range_reads: Vec::new(),
            write_set: BTreeMap::new(),
            status: TransactionStatus::Active,
        }
    }

    /// Whether reads and writes are still accepted
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    fn ensure_active(&self, collection: &str) -> StoreResult<()> {
        if self.is_active() {
            return Ok(());
        }
        Err(StoreError::backend(
            collection,
            format!("transaction {} is not active: {:?}", self.txn_id, self.status),
        ))
    }

    fn read_committed(&mut self, collection: &str, key: &str) -> StoreResult<Option<StoredValue>> {
        let stored = self.store.get_stored(collection, key)?;
        let version = stored.as_ref().map(|sv| sv.version()).unwrap_or(0);
        self.read_set.entry(slot(collection, key)).or_insert(version);
        Ok(stored)
    }

    /// Writes buffered so far, in apply order
    pub fn mutations(&self) -> Vec<Mutation> {
        self.write_set
            .iter()
            .map(|((collection, key), value)| Mutation {
                collection: collection.clone(),
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }

    /// Discard all buffered writes
    pub fn mark_aborted(&mut self, reason: impl Into<String>) {
        self.write_set.clear();
        self.status = TransactionStatus::Aborted {
            reason: reason.into(),
        };
    }

    pub(crate) fn mark_committed(&mut self, version: u64) {
        self.status = TransactionStatus::Committed { version };
    }

    pub(crate) fn store_arc(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

impl CollectionStore for TransactionContext {
    fn get(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.ensure_active(collection)?;
        if let Some(buffered) = self.write_set.get(&slot(collection, key)) {
            return Ok(buffered.clone());
        }
        let stored = self.read_committed(collection, key)?;
        tracing::debug!(txn = %self.txn_id, collection, key, found = stored.is_some(), "get");
        Ok(stored.map(StoredValue::into_value))
    }

    fn put(&mut self, collection: &str, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.ensure_active(collection)?;
        if collection.is_empty() {
            return Err(StoreError::backend(collection, "collection must not be an empty string"));
        }
        tracing::debug!(txn = %self.txn_id, collection, key, len = value.len(), "put");
        self.write_set.insert(slot(collection, key), Some(value));
        Ok(())
    }

    fn delete(&mut self, collection: &str, key: &str) -> StoreResult<()> {
        self.ensure_active(collection)?;
        if collection.is_empty() {
            return Err(StoreError::backend(collection, "collection must not be an empty string"));
        }
        tracing::debug!(txn = %self.txn_id, collection, key, "delete");
        self.write_set.insert(slot(collection, key), None);
        Ok(())
    }

    fn range_scan(&mut self, collection: &str, start: &str, end: &str) -> StoreResult<RangeIter<'_>> {
        self.ensure_active(collection)?;
        let committed = self.store.scan(collection, start, end)?;
        self.range_reads.push(RangeRead {
            collection: collection.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            observed: committed
                .iter()
                .map(|(k, sv)| (k.clone(), sv.version()))
                .collect(),
        });

        let mut merged: BTreeMap<String, Vec<u8>> = committed
            .into_iter()
            .map(|(k, sv)| (k, sv.into_value()))
            .collect();
        for ((c, k), value) in &self.write_set {
            if c != collection || !in_range(k, start, end) {
                continue;
            }
            match value {
                Some(v) => {
                    merged.insert(k.clone(), v.clone());
                }
                None => {
                    merged.remove(k);
                }
            }
        }
        tracing::debug!(txn = %self.txn_id, collection, start, end, count = merged.len(), "range_scan");
        Ok(Box::new(merged.into_iter().map(Ok::<KeyValue, StoreError>)))
    }

    fn hash(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.ensure_active(collection)?;
        if let Some(buffered) = self.write_set.get(&slot(collection, key)) {
            return Ok(buffered
                .as_ref()
                .map(|v| StoredValue::new(v.clone(), 0).hash().to_vec()));
        }
        let stored = self.read_committed(collection, key)?;
        Ok(stored.map(|sv| sv.hash().to_vec()))
    }
}
