//! Core types and traits for privreg
//!
//! This crate defines the foundational pieces every other crate builds on:
//! - EntitySchema: field naming and record kinds for one registry deployment
//! - PublicRecord / PrivateDetailRecord: the two stored record shapes
//! - RecordCodec: canonical JSON encoding of records under a schema
//! - CompositeKey: index key construction and parsing
//! - CollectionStore: the narrow collection-scoped store facade
//! - StoreError: failures surfaced by store implementations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composite;
pub mod error;
pub mod record;
pub mod schema;
pub mod traits;

pub use composite::{validate_simple_key, CompositeKey, KeyError, COMPOSITE_NAMESPACE, MAX_UNICODE_RUNE};
pub use error::{StoreError, StoreResult};
pub use record::{CodecError, PrivateDetailRecord, PublicRecord, RecordCodec, FIXED_FIELDS};
pub use schema::EntitySchema;
pub use traits::{CollectionStore, KeyValue, RangeIter};
