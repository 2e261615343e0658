//! Record shapes and their canonical encoding
//!
//! Two records describe one entity: a [`PublicRecord`] stored in the
//! restricted-group collection and a [`PrivateDetailRecord`] stored in the
//! more restricted one. Both are encoded as JSON objects whose field order
//! is fixed (`docType` first, then `name`, ...), so the same record always
//! produces the same bytes and therefore the same stored-value hash.
//!
//! Decoding follows zero-value semantics: unknown fields are ignored and a
//! missing (or `null`) field yields an empty string or `0`. A document that
//! is not a JSON object, or a field of the wrong JSON type, is an error.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::EntitySchema;

/// Field name of the record-kind tag
pub const DOC_TYPE_FIELD: &str = "docType";

/// Field names shared by every schema; a quantity field may not reuse them
pub const FIXED_FIELDS: [&str; 5] = [DOC_TYPE_FIELD, "name", "color", "owner", "price"];

/// Record visible to the restricted group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRecord {
    /// `docType` tag, the schema's public kind
    pub record_kind: String,
    /// Primary key within the collection
    pub name: String,
    /// Indexed attribute
    pub color: String,
    /// Positive-integer attribute (size, tire size, ...)
    pub quantity: i64,
    /// Current owner, the only mutable field
    pub owner: String,
}

/// Record holding the price, stored under the same name in the private collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateDetailRecord {
    /// `docType` tag, the schema's private kind
    pub record_kind: String,
    /// Same key as the matching [`PublicRecord`]
    pub name: String,
    /// Positive price
    pub price: i64,
}

/// Record encoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The bytes are not a JSON object
    #[error("malformed document: {reason}")]
    Malformed {
        /// Parser message
        reason: String,
    },

    /// A field holds a value of the wrong JSON type
    #[error("field '{field}' must be {expected}")]
    FieldType {
        /// Field name
        field: String,
        /// Expected type description
        expected: &'static str,
    },

    /// Serialization failed
    #[error("encode failed: {reason}")]
    Encode {
        /// Serializer message
        reason: String,
    },
}

/// Parse bytes into a JSON object
pub fn object_from_slice(bytes: &[u8]) -> Result<Map<String, Value>, CodecError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed {
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CodecError::Malformed {
            reason: format!("expected a JSON object, found {}", json_type_name(&other)),
        }),
    }
}

/// Read a string field, empty when missing or null
pub fn string_field(obj: &Map<String, Value>, field: &str) -> Result<String, CodecError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CodecError::FieldType {
            field: field.to_string(),
            expected: "a string",
        }),
    }
}

/// Read an integer field, `0` when missing or null
///
/// Fractional or out-of-range numbers are rejected rather than truncated.
pub fn int_field(obj: &Map<String, Value>, field: &str) -> Result<i64, CodecError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| CodecError::FieldType {
            field: field.to_string(),
            expected: "an integer",
        }),
        Some(_) => Err(CodecError::FieldType {
            field: field.to_string(),
            expected: "an integer",
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Encodes and decodes records under one [`EntitySchema`]
#[derive(Debug, Clone, Copy)]
pub struct RecordCodec<'a> {
    schema: &'a EntitySchema,
}

impl<'a> RecordCodec<'a> {
    /// Create a codec for a schema
    pub fn new(schema: &'a EntitySchema) -> Self {
        Self { schema }
    }

    /// Encode a public record
    pub fn encode_public(&self, record: &PublicRecord) -> Result<Vec<u8>, CodecError> {
        to_bytes(&PublicWire {
            quantity_field: &self.schema.quantity_field,
            record,
        })
    }

    /// Decode a public record
    pub fn decode_public(&self, bytes: &[u8]) -> Result<PublicRecord, CodecError> {
        let obj = object_from_slice(bytes)?;
        Ok(PublicRecord {
            record_kind: string_field(&obj, DOC_TYPE_FIELD)?,
            name: string_field(&obj, "name")?,
            color: string_field(&obj, "color")?,
            quantity: int_field(&obj, &self.schema.quantity_field)?,
            owner: string_field(&obj, "owner")?,
        })
    }

    /// Encode a private-detail record
    pub fn encode_private(&self, record: &PrivateDetailRecord) -> Result<Vec<u8>, CodecError> {
        to_bytes(&PrivateWire { record })
    }

    /// Decode a private-detail record
    pub fn decode_private(&self, bytes: &[u8]) -> Result<PrivateDetailRecord, CodecError> {
        let obj = object_from_slice(bytes)?;
        Ok(PrivateDetailRecord {
            record_kind: string_field(&obj, DOC_TYPE_FIELD)?,
            name: string_field(&obj, "name")?,
            price: int_field(&obj, "price")?,
        })
    }
}

fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::Encode {
        reason: e.to_string(),
    })
}

struct PublicWire<'a> {
    quantity_field: &'a str,
    record: &'a PublicRecord,
}

impl Serialize for PublicWire<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(DOC_TYPE_FIELD, &self.record.record_kind)?;
        map.serialize_entry("name", &self.record.name)?;
        map.serialize_entry("color", &self.record.color)?;
        map.serialize_entry(self.quantity_field, &self.record.quantity)?;
        map.serialize_entry("owner", &self.record.owner)?;
        map.end()
    }
}

struct PrivateWire<'a> {
    record: &'a PrivateDetailRecord,
}

impl Serialize for PrivateWire<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(DOC_TYPE_FIELD, &self.record.record_kind)?;
        map.serialize_entry("name", &self.record.name)?;
        map.serialize_entry("price", &self.record.price)?;
        map.end()
    }
}
