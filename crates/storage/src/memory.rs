//! MemoryStore: in-memory collection store with version management
//!
//! This module implements the storage backend using:
//! - `BTreeMap<String, BTreeMap<String, StoredValue>>` for ordered per-collection keys
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing versions
//!
//! # Design Notes
//!
//! - **No version history**: each key stores only its latest value
//! - **Version 0 means absent**: validators compare recorded versions against
//!   [`MemoryStore::version_of`], which reports 0 for missing keys
//! - **Batch writes hold the write lock once**: no reader can observe half of
//!   a committed invocation

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use privreg_core::{CollectionStore, KeyValue, RangeIter, StoreError, StoreResult};

use crate::stored_value::StoredValue;

type Collection = BTreeMap<String, StoredValue>;

/// A single buffered write: `Some` puts, `None` deletes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// Target collection
    pub collection: String,
    /// Target key
    pub key: String,
    /// New value, or `None` to delete
    pub value: Option<Vec<u8>>,
}

impl Mutation {
    /// A put of `value` at `key`
    pub fn put(collection: impl Into<String>, key: impl Into<String>, value: Vec<u8>) -> Self {
        Mutation {
            collection: collection.into(),
            key: key.into(),
            value: Some(value),
        }
    }

    /// A delete of `key`
    pub fn delete(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Mutation {
            collection: collection.into(),
            key: key.into(),
            value: None,
        }
    }
}

/// In-memory store partitioned by collection
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicU64`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Collection>>,
    version: AtomicU64,
}

fn check_collection(collection: &str) -> StoreResult<()> {
    if collection.is_empty() {
        return Err(StoreError::backend(
            collection,
            "collection must not be an empty string",
        ));
    }
    Ok(())
}

fn range_bounds<'a>(start: &'a str, end: &'a str) -> (Bound<&'a str>, Bound<&'a str>) {
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    (Bound::Included(start), upper)
}

impl MemoryStore {
    /// Create an empty store at version 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest version assigned so far
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Allocate the next version atomically
    pub fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Read the stored value for a key
    pub fn get_stored(&self, collection: &str, key: &str) -> StoreResult<Option<StoredValue>> {
        check_collection(collection)?;
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(key))
            .cloned())
    }

    /// Version of a key, 0 when absent
    pub fn version_of(&self, collection: &str, key: &str) -> StoreResult<u64> {
        Ok(self
            .get_stored(collection, key)?
            .map(|sv| sv.version())
            .unwrap_or(0))
    }

    /// Snapshot every entry in `[start, end)` of a collection
    ///
    /// An empty `end` scans to the end of the collection.
    pub fn scan(
        &self,
        collection: &str,
        start: &str,
        end: &str,
    ) -> StoreResult<Vec<(String, StoredValue)>> {
        check_collection(collection)?;
        if !end.is_empty() && start >= end {
            return Ok(Vec::new());
        }
        let collections = self.collections.read();
        let Some(c) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(c
            .range::<str, _>(range_bounds(start, end))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Apply a batch of mutations under a single write lock
    ///
    /// Every put is stamped with `version`. Deletes of absent keys are no-ops.
    pub fn apply_batch(&self, mutations: &[Mutation], version: u64) -> StoreResult<()> {
        for m in mutations {
            check_collection(&m.collection)?;
        }
        let mut collections = self.collections.write();
        for m in mutations {
            match &m.value {
                Some(value) => {
                    collections
                        .entry(m.collection.clone())
                        .or_default()
                        .insert(m.key.clone(), StoredValue::new(value.clone(), version));
                }
                None => {
                    if let Some(c) = collections.get_mut(&m.collection) {
                        c.remove(&m.key);
                    }
                }
            }
        }
        self.version.fetch_max(version, Ordering::SeqCst);
        tracing::trace!(version, count = mutations.len(), "applied batch");
        Ok(())
    }

    /// Number of keys stored in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    /// Whether a collection holds no keys
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// All keys of a collection in ascending order
    pub fn keys(&self, collection: &str) -> Vec<String> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Auto-commit access: every write is applied immediately with a fresh version
impl CollectionStore for MemoryStore {
    fn get(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.get_stored(collection, key)?.map(StoredValue::into_value))
    }

    fn put(&mut self, collection: &str, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let version = self.next_version();
        self.apply_batch(&[Mutation::put(collection, key, value)], version)
    }

    fn delete(&mut self, collection: &str, key: &str) -> StoreResult<()> {
        let version = self.next_version();
        self.apply_batch(&[Mutation::delete(collection, key)], version)
    }

    fn range_scan(&mut self, collection: &str, start: &str, end: &str) -> StoreResult<RangeIter<'_>> {
        let entries = self.scan(collection, start, end)?;
        Ok(Box::new(
            entries
                .into_iter()
                .map(|(k, sv)| Ok::<KeyValue, StoreError>((k, sv.into_value()))),
        ))
    }

    fn hash(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self
            .get_stored(collection, key)?
            .map(|sv| sv.hash().to_vec()))
    }
}
