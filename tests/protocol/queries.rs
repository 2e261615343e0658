//! Query Tests
//!
//! rangeQuery and queryByColor through the ledger, including payload shape.

use crate::common::*;

fn range(ledger: &Ledger, start: &str, end: &str) -> Response {
    ledger.invoke(&Invocation::new("rangeQuery").arg(start).arg(end))
}

fn seed(ledger: &Ledger) {
    create(ledger, "c", "blue", "tom");
    create(ledger, "a", "red", "ann");
    create(ledger, "b", "blue", "bob");
}

// ============================================================================
// Range
// ============================================================================

#[test]
fn range_is_half_open_and_sorted() {
    let ledger = asset_ledger();
    seed(&ledger);
    assert_eq!(result_keys(&range(&ledger, "a", "c")), vec!["a", "b"]);
    assert_eq!(result_keys(&range(&ledger, "b", "")), vec!["b", "c"]);
    assert_eq!(result_keys(&range(&ledger, "", "")), vec!["a", "b", "c"]);
}

#[test]
fn range_payload_has_key_and_record() {
    let ledger = asset_ledger();
    seed(&ledger);
    let payload = payload_json(&range(&ledger, "a", "b"));
    assert_eq!(
        payload,
        json!([{
            "Key": "a",
            "Record": {"docType": "asset", "name": "a", "color": "red", "size": 10, "owner": "ann"}
        }])
    );
}

#[test]
fn empty_range_is_empty_array() {
    let ledger = asset_ledger();
    seed(&ledger);
    let resp = range(&ledger, "x", "z");
    assert_eq!(resp.payload, b"[]".to_vec());
}

#[test]
fn range_never_returns_index_entries() {
    let ledger = asset_ledger();
    seed(&ledger);
    assert_eq!(ledger.store().len(PUBLIC), 6);
    let payload = payload_json(&range(&ledger, "", ""));
    for entry in payload.as_array().unwrap() {
        assert!(!entry["Key"].as_str().unwrap().starts_with('\u{0}'));
        assert!(entry["Record"]["docType"] == "asset");
    }
}

#[test]
fn range_rejects_composite_bounds() {
    let ledger = asset_ledger();
    let resp = range(&ledger, "\u{0}color~name\u{0}", "");
    assert_eq!(error_kind(&resp), "invalid_attribute");
}

#[test]
fn range_argument_count() {
    let ledger = asset_ledger();
    let resp = ledger.invoke(&Invocation::new("rangeQuery").arg("a"));
    assert_eq!(error_kind(&resp), "invalid_arguments");
}

// ============================================================================
// By color
// ============================================================================

#[test]
fn by_color_returns_matching_names_in_order() {
    let ledger = asset_ledger();
    seed(&ledger);
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "blue"))), vec!["b", "c"]);
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "red"))), vec!["a"]);
    assert!(result_keys(&ledger.invoke(&query("queryByColor", "green"))).is_empty());
}

#[test]
fn by_color_records_reflect_transfers() {
    let ledger = asset_ledger();
    seed(&ledger);
    assert!(ledger.invoke(&transfer_inv("b", "zoe")).is_ok());
    let payload = payload_json(&ledger.invoke(&query("queryByColor", "blue")));
    assert_eq!(payload[0]["Record"]["owner"], "zoe");
}

#[test]
fn by_color_prefix_is_exact() {
    let ledger = asset_ledger();
    create(&ledger, "a", "blue", "tom");
    create(&ledger, "b", "bluegreen", "tom");
    create(&ledger, "c", "blu", "tom");
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "blue"))), vec!["a"]);
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "blu"))), vec!["c"]);
}

#[test]
fn by_color_agrees_with_full_range() {
    let ledger = asset_ledger();
    for (i, color) in ["red", "blue", "red", "green", "blue", "red"].iter().enumerate() {
        create(&ledger, &format!("asset{}", i), color, "tom");
    }
    assert!(ledger.invoke(&delete_inv("asset2")).is_ok());

    let all = payload_json(&range(&ledger, "", ""));
    let expected: Vec<String> = all
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["Record"]["color"] == "red")
        .map(|e| e["Key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(expected, vec!["asset0", "asset5"]);
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "red"))), expected);
}
