//! Shared fixtures for executor tests.

use privreg_core::CollectionStore;
use privreg_storage::MemoryStore;
use serde_json::{json, Value};

use crate::{Command, Deployment, Executor, Output, Result, TransientMap};

pub const PUBLIC: &str = "collectionAssets";
pub const PRIVATE: &str = "collectionAssetPrivateDetails";

/// Executor for the asset deployment plus an auto-commit store.
pub fn setup() -> (Executor, MemoryStore) {
    (Executor::new(Deployment::asset()), MemoryStore::new())
}

pub fn transient(key: &str, value: Value) -> TransientMap {
    let mut map = TransientMap::new();
    map.insert(key.to_string(), value.to_string().into_bytes());
    map
}

pub fn create_payload(name: &str, color: &str, size: i64, owner: &str, price: i64) -> TransientMap {
    transient(
        "asset",
        json!({"name": name, "color": color, "size": size, "owner": owner, "price": price}),
    )
}

pub fn create(
    executor: &Executor,
    store: &mut dyn CollectionStore,
    name: &str,
    color: &str,
    owner: &str,
) -> Result<Output> {
    executor.execute(Command::Create, store, &create_payload(name, color, 10, owner, 100))
}

pub fn record_json(output: Output) -> Value {
    match output {
        Output::Record(bytes) => serde_json::from_slice(&bytes).unwrap(),
        other => panic!("expected Record, got {:?}", other),
    }
}

/// Every `(collection, key)` currently stored, for before/after comparisons.
pub fn snapshot(store: &MemoryStore) -> Vec<(String, String, Vec<u8>)> {
    let mut all = Vec::new();
    for collection in [PUBLIC, PRIVATE] {
        for (key, sv) in store.scan(collection, "", "").unwrap() {
            all.push((collection.to_string(), key, sv.into_value()));
        }
    }
    all
}
