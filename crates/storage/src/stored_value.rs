//! Stored value wrapper
//!
//! Pairs the raw bytes with the version of the write that produced them and
//! the SHA-256 digest served by hash reads. The digest is computed once at
//! write time so hash reads never touch the value.

use sha2::{Digest, Sha256};

/// Length in bytes of a value hash
pub const HASH_LEN: usize = 32;

/// A value as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    value: Vec<u8>,
    version: u64,
    hash: [u8; HASH_LEN],
}

impl StoredValue {
    /// Wrap `value` written at `version`
    pub fn new(value: Vec<u8>, version: u64) -> Self {
        let hash = Sha256::digest(&value).into();
        StoredValue {
            value,
            version,
            hash,
        }
    }

    /// The stored bytes
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Version of the write that produced this value
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// SHA-256 of the stored bytes
    #[inline]
    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// Consume and return the bytes
    #[inline]
    pub fn into_value(self) -> Vec<u8> {
        self.value
    }
}
