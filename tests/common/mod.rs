//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

pub use privreg::{
    CompositeKey, Deployment, Error, Invocation, Ledger, Response, RegistryConfig, STATUS_ERROR,
    STATUS_OK,
};
pub use serde_json::{json, Value};

/// Public collection of the asset deployment.
pub const PUBLIC: &str = "collectionAssets";
/// Private collection of the asset deployment.
pub const PRIVATE: &str = "collectionAssetPrivateDetails";

/// Fresh ledger for the built-in asset deployment.
pub fn asset_ledger() -> Ledger {
    Ledger::new(Deployment::asset())
}

pub fn create_inv(name: &str, color: &str, size: i64, owner: &str, price: i64) -> Invocation {
    Invocation::new("create").transient_json(
        "asset",
        &json!({"name": name, "color": color, "size": size, "owner": owner, "price": price}),
    )
}

pub fn transfer_inv(name: &str, owner: &str) -> Invocation {
    Invocation::new("transfer").transient_json("asset_owner", &json!({"name": name, "owner": owner}))
}

pub fn delete_inv(name: &str) -> Invocation {
    Invocation::new("delete").transient_json("asset_delete", &json!({ "name": name }))
}

/// Single-argument invocation, e.g. `query("readPublic", "asset1")`.
pub fn query(function: &str, arg: &str) -> Invocation {
    Invocation::new(function).arg(arg)
}

/// Create with size 10 and price 100, asserting success.
pub fn create(ledger: &Ledger, name: &str, color: &str, owner: &str) {
    let resp = ledger.invoke(&create_inv(name, color, 10, owner, 100));
    assert!(resp.is_ok(), "create {} failed: {}", name, resp.message);
}

/// Parse a successful response payload as JSON.
pub fn payload_json(resp: &Response) -> Value {
    assert!(resp.is_ok(), "expected success, got: {}", resp.message);
    serde_json::from_slice(&resp.payload).expect("payload is not JSON")
}

/// `Key` fields of a query response, in order.
pub fn result_keys(resp: &Response) -> Vec<String> {
    payload_json(resp)
        .as_array()
        .expect("query payload is an array")
        .iter()
        .map(|e| e["Key"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Error kind of a failed response.
pub fn error_kind(resp: &Response) -> &'static str {
    assert_eq!(resp.status, STATUS_ERROR, "expected failure");
    resp.error.as_ref().expect("failure carries an error").kind()
}

pub fn index_key(color: &str, name: &str) -> String {
    CompositeKey::create("color~name", &[color, name]).expect("valid index attributes")
}

/// Full committed contents of both asset collections.
pub fn snapshot(ledger: &Ledger) -> Vec<(String, String, Vec<u8>)> {
    let mut all = Vec::new();
    for collection in [PUBLIC, PRIVATE] {
        for (key, sv) in ledger.store().scan(collection, "", "").expect("readable store") {
            all.push((collection.to_string(), key, sv.into_value()));
        }
    }
    all
}
