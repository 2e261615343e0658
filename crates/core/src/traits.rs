//! Collection store facade
//!
//! [`CollectionStore`] is the narrow view of the host's private-data store
//! that the registry protocol needs. Every operation is scoped to a named
//! collection and reports absence distinctly from content.
//!
//! Implementations are invocation-scoped: nothing written through the trait
//! is externally visible until the host commits the surrounding invocation,
//! and the host may still discard it at commit time.

use crate::error::StoreResult;

/// One `(key, value)` pair yielded by a range scan
pub type KeyValue = (String, Vec<u8>);

/// Lazy range-scan cursor; each item fails independently
pub type RangeIter<'a> = Box<dyn Iterator<Item = StoreResult<KeyValue>> + 'a>;

/// Store operations the registry relies on
///
/// Methods take `&mut self` because invocation-scoped implementations track
/// what was read and buffer what was written.
pub trait CollectionStore {
    /// Get the value stored under `key`, `None` if absent
    fn get(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Create or overwrite `key`
    fn put(&mut self, collection: &str, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&mut self, collection: &str, key: &str) -> StoreResult<()>;

    /// Scan `[start, end)` in ascending key order
    ///
    /// An empty `end` means "no upper bound".
    fn range_scan(&mut self, collection: &str, start: &str, end: &str) -> StoreResult<RangeIter<'_>>;

    /// Fixed-size fingerprint of the value under `key`, `None` if absent
    fn hash(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>>;
}

impl<T: CollectionStore + ?Sized> CollectionStore for &mut T {
    fn get(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(collection, key)
    }

    fn put(&mut self, collection: &str, key: &str, value: Vec<u8>) -> StoreResult<()> {
        (**self).put(collection, key, value)
    }

    fn delete(&mut self, collection: &str, key: &str) -> StoreResult<()> {
        (**self).delete(collection, key)
    }

    fn range_scan(&mut self, collection: &str, start: &str, end: &str) -> StoreResult<RangeIter<'_>> {
        (**self).range_scan(collection, start, end)
    }

    fn hash(&mut self, collection: &str, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).hash(collection, key)
    }
}
