//! Storage layer for privreg
//!
//! This crate implements the in-memory reference backend:
//! - MemoryStore: per-collection BTreeMaps behind one RwLock
//! - Per-key versions from a global AtomicU64, used for commit-time validation
//! - SHA-256 value hashes computed at write time for disclosure-limited reads
//! - Atomic batch application of a committed invocation's writes
//!
//! `MemoryStore` also implements `CollectionStore` directly with auto-commit
//! semantics, which is convenient for single-threaded tools and tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod stored_value;

pub use memory::{MemoryStore, Mutation};
pub use stored_value::{StoredValue, HASH_LEN};
