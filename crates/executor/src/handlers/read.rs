//! Read and hash handlers.

use privreg_core::CollectionStore;

use crate::convert::store_failure;
use crate::{Command, Deployment, Error, Output, Result};

fn not_found(operation: &'static str, record: &str, name: &str) -> Error {
    Error::NotFound {
        operation: operation.to_string(),
        record: record.to_string(),
        name: name.to_string(),
    }
}

/// Handle ReadPublic command.
pub fn read_public(d: &Deployment, store: &mut dyn CollectionStore, name: String) -> Result<Output> {
    let op = Command::READ_PUBLIC;
    let bytes = store
        .get(&d.public_collection, &name)
        .map_err(store_failure(op))?
        .ok_or_else(|| not_found(op, &d.schema.public_kind, &name))?;
    Ok(Output::Record(bytes))
}

/// Handle ReadPrivateDetail command.
pub fn read_private_detail(
    d: &Deployment,
    store: &mut dyn CollectionStore,
    name: String,
) -> Result<Output> {
    let op = Command::READ_PRIVATE_DETAIL;
    let bytes = store
        .get(&d.private_collection, &name)
        .map_err(store_failure(op))?
        .ok_or_else(|| not_found(op, &d.schema.private_kind, &name))?;
    Ok(Output::Record(bytes))
}

/// Handle HashOfPublic command.
pub fn hash_of_public(d: &Deployment, store: &mut dyn CollectionStore, name: String) -> Result<Output> {
    let op = Command::HASH_OF_PUBLIC;
    let hash = store
        .hash(&d.public_collection, &name)
        .map_err(store_failure(op))?
        .ok_or_else(|| not_found(op, &d.schema.public_kind, &name))?;
    Ok(Output::Hash(hash))
}

/// Handle HashOfPrivateDetail command.
pub fn hash_of_private_detail(
    d: &Deployment,
    store: &mut dyn CollectionStore,
    name: String,
) -> Result<Output> {
    let op = Command::HASH_OF_PRIVATE_DETAIL;
    let hash = store
        .hash(&d.private_collection, &name)
        .map_err(store_failure(op))?
        .ok_or_else(|| not_found(op, &d.schema.private_kind, &name))?;
    Ok(Output::Hash(hash))
}
