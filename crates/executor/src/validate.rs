//! Transient input validation
//!
//! Create, transfer and delete take their data from the transient map. Each
//! decoder looks up the schema-derived key, decodes the JSON payload with
//! zero-value semantics and checks field constraints in a fixed order, so
//! the first violated constraint is the one reported.

use privreg_core::record::{int_field, object_from_slice, string_field};
use privreg_core::{validate_simple_key, EntitySchema};
use serde_json::{Map, Value};

use crate::{Command, Error, TransientMap};

/// Decoded payload of a create invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInput {
    /// Record name
    pub name: String,
    /// Indexed color
    pub color: String,
    /// Value of the schema's quantity field
    pub quantity: i64,
    /// Initial owner
    pub owner: String,
    /// Price kept in the private detail
    pub price: i64,
}

/// Decoded payload of a transfer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInput {
    /// Record name
    pub name: String,
    /// New owner
    pub owner: String,
}

/// Decoded payload of a delete invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteInput {
    /// Record name
    pub name: String,
}

const NON_EMPTY: &str = "must be a non-empty string";
const POSITIVE: &str = "must be a positive integer";

fn invalid(operation: &str, name: &str, field: &str, reason: &str) -> Error {
    Error::InvalidField {
        operation: operation.to_string(),
        name: name.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Look up and decode the transient entry `key` as a JSON object
fn transient_object(
    operation: &'static str,
    transient: &TransientMap,
    key: &str,
) -> Result<Map<String, Value>, Error> {
    let payload = transient.get(key).ok_or_else(|| Error::MissingTransientKey {
        operation: operation.to_string(),
        key: key.to_string(),
    })?;
    if payload.is_empty() {
        return Err(Error::EmptyTransientValue {
            operation: operation.to_string(),
            key: key.to_string(),
        });
    }
    object_from_slice(payload).map_err(|e| Error::MalformedInput {
        operation: operation.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Read a field, reporting a wrongly-typed value as malformed input
fn field<T>(
    operation: &'static str,
    key: &str,
    read: Result<T, privreg_core::CodecError>,
) -> Result<T, Error> {
    read.map_err(|e| Error::MalformedInput {
        operation: operation.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn require_name(operation: &'static str, name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(invalid(operation, "", "name", NON_EMPTY));
    }
    validate_simple_key(name).map_err(|e| invalid(operation, "", "name", &e.to_string()))
}

fn require_non_empty(
    operation: &'static str,
    name: &str,
    field: &str,
    value: &str,
) -> Result<(), Error> {
    if value.is_empty() {
        return Err(invalid(operation, name, field, NON_EMPTY));
    }
    Ok(())
}

fn require_positive(operation: &'static str, name: &str, field: &str, value: i64) -> Result<(), Error> {
    if value <= 0 {
        return Err(invalid(operation, name, field, POSITIVE));
    }
    Ok(())
}

/// Decode and check the create payload under `schema.create_key()`
pub fn create_input(schema: &EntitySchema, transient: &TransientMap) -> Result<CreateInput, Error> {
    let op = Command::CREATE;
    let key = schema.create_key();
    let obj = transient_object(op, transient, &key)?;
    let input = CreateInput {
        name: field(op, &key, string_field(&obj, "name"))?,
        color: field(op, &key, string_field(&obj, "color"))?,
        quantity: field(op, &key, int_field(&obj, &schema.quantity_field))?,
        owner: field(op, &key, string_field(&obj, "owner"))?,
        price: field(op, &key, int_field(&obj, "price"))?,
    };

    require_name(op, &input.name)?;
    require_non_empty(op, &input.name, "color", &input.color)?;
    require_positive(op, &input.name, &schema.quantity_field, input.quantity)?;
    require_non_empty(op, &input.name, "owner", &input.owner)?;
    require_positive(op, &input.name, "price", input.price)?;
    Ok(input)
}

/// Decode and check the transfer payload under `schema.transfer_key()`
pub fn transfer_input(schema: &EntitySchema, transient: &TransientMap) -> Result<TransferInput, Error> {
    let op = Command::TRANSFER;
    let key = schema.transfer_key();
    let obj = transient_object(op, transient, &key)?;
    let input = TransferInput {
        name: field(op, &key, string_field(&obj, "name"))?,
        owner: field(op, &key, string_field(&obj, "owner"))?,
    };

    require_name(op, &input.name)?;
    require_non_empty(op, &input.name, "owner", &input.owner)?;
    Ok(input)
}

/// Decode and check the delete payload under `schema.delete_key()`
pub fn delete_input(schema: &EntitySchema, transient: &TransientMap) -> Result<DeleteInput, Error> {
    let op = Command::DELETE;
    let key = schema.delete_key();
    let obj = transient_object(op, transient, &key)?;
    let input = DeleteInput {
        name: field(op, &key, string_field(&obj, "name"))?,
    };

    require_name(op, &input.name)?;
    Ok(input)
}
