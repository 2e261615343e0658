//! Create, transfer and delete handlers.
//!
//! These are the multi-record operations: each one touches the public
//! record and, for create and delete, the private detail and index entry
//! as well. All writes go through the same invocation-scoped store so the
//! host commits or discards them together.

use privreg_core::{CollectionStore, PrivateDetailRecord, PublicRecord};

use crate::convert::{corrupt_record, serialization, store_failure};
use crate::index::IndexManager;
use crate::validate;
use crate::{Command, Deployment, Error, Output, Result, TransientMap};

/// Handle Create.
///
/// Writes the public record, the private detail and the index entry.
pub fn create(
    d: &Deployment,
    store: &mut dyn CollectionStore,
    transient: &TransientMap,
) -> Result<Output> {
    let op = Command::CREATE;
    tracing::info!(entity = %d.schema.entity, "- start init {}", d.schema.entity);

    let input = validate::create_input(&d.schema, transient)?;

    let existing = store
        .get(&d.public_collection, &input.name)
        .map_err(store_failure(op))?;
    if existing.is_some() {
        return Err(Error::AlreadyExists {
            operation: op.to_string(),
            entity: d.schema.entity.clone(),
            name: input.name,
        });
    }

    let index = IndexManager::new(d);
    // Reject reserved characters in the index attributes before any write
    index.entry_key(op, &input.color, &input.name)?;

    let codec = d.codec();
    let record = PublicRecord {
        record_kind: d.schema.public_kind.clone(),
        name: input.name.clone(),
        color: input.color,
        quantity: input.quantity,
        owner: input.owner,
    };
    let record_bytes = codec.encode_public(&record).map_err(serialization)?;
    store
        .put(&d.public_collection, &record.name, record_bytes)
        .map_err(store_failure(op))?;

    let details = PrivateDetailRecord {
        record_kind: d.schema.private_kind.clone(),
        name: input.name,
        price: input.price,
    };
    let details_bytes = codec.encode_private(&details).map_err(serialization)?;
    store
        .put(&d.private_collection, &details.name, details_bytes)
        .map_err(store_failure(op))?;

    index.attach(store, op, &record)?;

    tracing::info!(name = %record.name, "- end init {}", d.schema.entity);
    Ok(Output::Unit)
}

/// Handle Transfer.
///
/// Rewrites only the owner of the public record.
pub fn transfer(
    d: &Deployment,
    store: &mut dyn CollectionStore,
    transient: &TransientMap,
) -> Result<Output> {
    let op = Command::TRANSFER;
    tracing::info!(entity = %d.schema.entity, "- start transfer {}", d.schema.entity);

    let input = validate::transfer_input(&d.schema, transient)?;

    let bytes = store
        .get(&d.public_collection, &input.name)
        .map_err(store_failure(op))?
        .ok_or_else(|| Error::NotFound {
            operation: op.to_string(),
            record: d.schema.public_kind.clone(),
            name: input.name.clone(),
        })?;

    let codec = d.codec();
    let mut record = codec
        .decode_public(&bytes)
        .map_err(corrupt_record(op, &input.name))?;
    record.owner = input.owner;

    let updated = codec.encode_public(&record).map_err(serialization)?;
    store
        .put(&d.public_collection, &input.name, updated)
        .map_err(store_failure(op))?;

    tracing::info!(name = %input.name, owner = %record.owner, "- end transfer (success)");
    Ok(Output::Unit)
}

/// Handle Delete.
///
/// Removes the public record, its index entry and the private detail. The
/// index key is derived from the stored record, so it matches the entry
/// written at creation.
pub fn delete(
    d: &Deployment,
    store: &mut dyn CollectionStore,
    transient: &TransientMap,
) -> Result<Output> {
    let op = Command::DELETE;
    tracing::info!(entity = %d.schema.entity, "- start delete {}", d.schema.entity);

    let input = validate::delete_input(&d.schema, transient)?;

    let bytes = store
        .get(&d.public_collection, &input.name)
        .map_err(store_failure(op))?
        .ok_or_else(|| Error::NotFound {
            operation: op.to_string(),
            record: d.schema.public_kind.clone(),
            name: input.name.clone(),
        })?;
    let record = d
        .codec()
        .decode_public(&bytes)
        .map_err(corrupt_record(op, &input.name))?;

    store
        .delete(&d.public_collection, &input.name)
        .map_err(store_failure(op))?;

    IndexManager::new(d).detach(store, op, &record)?;

    // Absent private details are not an error
    store
        .delete(&d.private_collection, &input.name)
        .map_err(store_failure(op))?;

    tracing::info!(name = %input.name, "- end delete {}", d.schema.entity);
    Ok(Output::Unit)
}
