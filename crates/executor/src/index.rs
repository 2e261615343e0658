//! Secondary index maintenance
//!
//! Each public record has exactly one entry in the `(color, name)` index,
//! stored in the public collection under a composite key and mapped to a
//! one-byte sentinel. Only key presence matters; the value is never read.

use privreg_core::{CollectionStore, CompositeKey, PublicRecord};

use crate::convert::{invalid_attribute, store_failure};
use crate::{Deployment, Error};

/// Value stored under every index key
pub const INDEX_SENTINEL: [u8; 1] = [0x00];

/// Creates and removes index entries for one deployment
#[derive(Debug, Clone, Copy)]
pub struct IndexManager<'a> {
    deployment: &'a Deployment,
}

impl<'a> IndexManager<'a> {
    /// Index manager for `deployment`
    pub fn new(deployment: &'a Deployment) -> Self {
        IndexManager { deployment }
    }

    /// Index key for `(color, name)`
    pub fn entry_key(&self, operation: &'static str, color: &str, name: &str) -> Result<String, Error> {
        CompositeKey::create(&self.deployment.schema.index_name, &[color, name])
            .map_err(invalid_attribute(operation))
    }

    /// Key range holding every entry whose color is `color`
    pub fn color_range(&self, operation: &'static str, color: &str) -> Result<(String, String), Error> {
        CompositeKey::prefix_range(&self.deployment.schema.index_name, &[color])
            .map_err(invalid_attribute(operation))
    }

    /// Put the sentinel under the record's index key
    pub fn attach(
        &self,
        store: &mut dyn CollectionStore,
        operation: &'static str,
        record: &PublicRecord,
    ) -> Result<(), Error> {
        let key = self.entry_key(operation, &record.color, &record.name)?;
        store
            .put(&self.deployment.public_collection, &key, INDEX_SENTINEL.to_vec())
            .map_err(store_failure(operation))
    }

    /// Delete the record's index key
    pub fn detach(
        &self,
        store: &mut dyn CollectionStore,
        operation: &'static str,
        record: &PublicRecord,
    ) -> Result<(), Error> {
        let key = self.entry_key(operation, &record.color, &record.name)?;
        store
            .delete(&self.deployment.public_collection, &key)
            .map_err(store_failure(operation))
    }
}
