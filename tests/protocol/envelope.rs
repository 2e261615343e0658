//! Envelope Tests
//!
//! JSON form of invocations and responses as exchanged with a peer.

use crate::common::*;

#[test]
fn invocation_json_carries_base64_transient_values() {
    let inv = Invocation::new("delete").transient("asset_delete", br#"{"name":"a"}"#.to_vec());
    let text = serde_json::to_string(&inv).unwrap();
    assert_eq!(
        text,
        r#"{"function":"delete","args":[],"transient":{"asset_delete":"eyJuYW1lIjoiYSJ9"}}"#
    );
    assert_eq!(serde_json::from_str::<Invocation>(&text).unwrap(), inv);
}

#[test]
fn invocation_from_minimal_json() {
    let inv: Invocation =
        serde_json::from_str(r#"{"function":"readPublic","args":["asset1"]}"#).unwrap();
    assert_eq!(inv, Invocation::new("readPublic").arg("asset1"));
}

#[test]
fn invocation_with_bad_base64_is_rejected() {
    let err = serde_json::from_str::<Invocation>(
        r#"{"function":"create","transient":{"asset":"not base64!"}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("asset"));
}

#[test]
fn decoded_invocation_runs() {
    let ledger = asset_ledger();
    let text = serde_json::to_string(&create_inv("asset1", "blue", 5, "tom", 7)).unwrap();
    let inv: Invocation = serde_json::from_str(&text).unwrap();
    assert!(ledger.invoke(&inv).is_ok());
}

#[test]
fn success_response_json() {
    let ledger = asset_ledger();
    create(&ledger, "a", "blue", "tom");
    let resp = ledger.invoke(&query("readPrivateDetail", "a"));
    let value: Value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["status"], STATUS_OK);
    assert_eq!(value["message"], "");
    assert!(value.get("error").is_none());

    let back: Response = serde_json::from_value(value).unwrap();
    assert_eq!(back, resp);
}

#[test]
fn failure_response_json_names_the_error() {
    let ledger = asset_ledger();
    let resp = ledger.invoke(&Invocation::new("mint"));
    assert_eq!(resp.message, "received unknown function invocation: mint");
    let value: Value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["status"], STATUS_ERROR);
    assert_eq!(value["payload"], "");
    assert!(value["error"].is_object());
    assert_eq!(serde_json::from_value::<Response>(value).unwrap(), resp);
}
