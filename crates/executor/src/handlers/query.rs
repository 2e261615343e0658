//! Range and index query handlers.
//!
//! Both produce `Output::Entries`: `{Key, Record}` pairs in ascending key
//! order, where `Record` is the stored public record parsed as JSON.

use privreg_core::{
    validate_simple_key, CollectionStore, CompositeKey, KeyValue, StoreResult, COMPOSITE_NAMESPACE,
};
use serde_json::Value;

use crate::convert::{invalid_attribute, iteration_failure, store_failure};
use crate::index::IndexManager;
use crate::output::QueryEntry;
use crate::{Command, Deployment, Error, Output, Result};

/// Lower bound substituted for an empty start key; skips the composite namespace
const SIMPLE_KEY_FLOOR: &str = "\u{1}";

fn parse_record(operation: &'static str, key: &str, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| Error::CorruptRecord {
        operation: operation.to_string(),
        name: key.to_string(),
        reason: e.to_string(),
    })
}

/// Handle RangeQuery command.
///
/// Bounds follow simple-key rules: an empty start scans from the first
/// simple key, an empty end is unbounded, and a bound inside the composite
/// namespace is rejected. Index entries therefore never appear in results.
pub fn range_query(
    d: &Deployment,
    store: &mut dyn CollectionStore,
    start_key: String,
    end_key: String,
) -> Result<Output> {
    let op = Command::RANGE_QUERY;
    for bound in [&start_key, &end_key] {
        validate_simple_key(bound).map_err(invalid_attribute(op))?;
    }
    let start = if start_key.is_empty() {
        SIMPLE_KEY_FLOOR
    } else {
        start_key.as_str()
    };

    let scanned: Vec<KeyValue> = store
        .range_scan(&d.public_collection, start, &end_key)
        .map_err(store_failure(op))?
        .collect::<StoreResult<_>>()
        .map_err(iteration_failure(op))?;

    let mut entries = Vec::with_capacity(scanned.len());
    for (key, bytes) in scanned {
        let record = parse_record(op, &key, &bytes)?;
        entries.push(QueryEntry { key, record });
    }
    tracing::debug!(start, end = %end_key, count = entries.len(), "range query");
    Ok(Output::Entries(entries))
}

/// Handle QueryByColor command.
///
/// Enumerates the `color~name` index for `color` and reads each record the
/// index points at. An index entry whose record is gone is skipped.
pub fn query_by_color(d: &Deployment, store: &mut dyn CollectionStore, color: String) -> Result<Output> {
    let op = Command::QUERY_BY_COLOR;
    let (start, end) = IndexManager::new(d).color_range(op, &color)?;

    let index_keys: Vec<String> = store
        .range_scan(&d.public_collection, &start, &end)
        .map_err(store_failure(op))?
        .map(|item| item.map(|(key, _)| key))
        .collect::<StoreResult<_>>()
        .map_err(iteration_failure(op))?;

    let mut entries = Vec::with_capacity(index_keys.len());
    for index_key in index_keys {
        let name = match CompositeKey::split(&index_key) {
            Ok(parsed) if parsed.attributes.len() == 2 => parsed.attributes[1].clone(),
            _ => {
                return Err(Error::CorruptRecord {
                    operation: op.to_string(),
                    name: index_key.replace(COMPOSITE_NAMESPACE, "\\0"),
                    reason: format!("not a {} index key", d.schema.index_name),
                })
            }
        };
        let Some(bytes) = store
            .get(&d.public_collection, &name)
            .map_err(store_failure(op))?
        else {
            tracing::warn!(%color, %name, "index entry without record, skipping");
            continue;
        };
        let record = parse_record(op, &name, &bytes)?;
        entries.push(QueryEntry { key: name, record });
    }
    Ok(Output::Entries(entries))
}
