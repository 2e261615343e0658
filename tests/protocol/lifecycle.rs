//! Lifecycle Tests
//!
//! Create, transfer and delete as observed by later invocations.

use crate::common::*;

// ============================================================================
// Create
// ============================================================================

#[test]
fn create_then_read_both_parts() {
    let ledger = asset_ledger();
    assert!(ledger.invoke(&create_inv("asset1", "blue", 35, "tom", 99)).is_ok());

    let public = payload_json(&ledger.invoke(&query("readPublic", "asset1")));
    assert_eq!(
        public,
        json!({"docType": "asset", "name": "asset1", "color": "blue", "size": 35, "owner": "tom"})
    );
    let private = payload_json(&ledger.invoke(&query("readPrivateDetail", "asset1")));
    assert_eq!(
        private,
        json!({"docType": "assetPrivateDetails", "name": "asset1", "price": 99})
    );
}

#[test]
fn duplicate_create_leaves_state_unchanged() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let before = snapshot(&ledger);

    let resp = ledger.invoke(&create_inv("asset1", "red", 1, "jerry", 1));
    assert_eq!(error_kind(&resp), "already_exists");
    assert_eq!(resp.message, "create: this asset already exists: asset1");
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn validation_failures_have_no_effect() {
    let ledger = asset_ledger();
    for inv in [
        create_inv("asset1", "blue", 0, "tom", 99),
        create_inv("asset1", "", 35, "tom", 99),
        create_inv("asset1", "blue", -3, "tom", 99),
        create_inv("", "blue", 35, "tom", 99),
        create_inv("asset1", "blue", 35, "", 99),
        create_inv("asset1", "blue", 35, "tom", 0),
    ] {
        assert_eq!(error_kind(&ledger.invoke(&inv)), "invalid_field");
    }
    assert!(snapshot(&ledger).is_empty());
    assert_eq!(ledger.store().current_version(), 0);
}

#[test]
fn failure_messages_name_operation_and_record() {
    let ledger = asset_ledger();
    let resp = ledger.invoke(&create_inv("asset1", "blue", 35, "tom", 0));
    assert_eq!(resp.message, "create: price field of asset1 must be a positive integer");
    match resp.error {
        Some(Error::InvalidField { operation, name, field, .. }) => {
            assert_eq!((operation.as_str(), name.as_str(), field.as_str()), ("create", "asset1", "price"));
        }
        other => panic!("unexpected {:?}", other),
    }

    create(&ledger, "asset1", "blue", "tom");
    let resp = ledger.invoke(&create_inv("asset1", "red", 1, "ann", 1));
    assert!(matches!(
        resp.error,
        Some(Error::AlreadyExists { ref operation, ref name, .. }) if operation == "create" && name == "asset1"
    ));
}

#[test]
fn create_without_transient_data() {
    let ledger = asset_ledger();
    let resp = ledger.invoke(&Invocation::new("create"));
    assert_eq!(error_kind(&resp), "missing_transient_key");
    assert!(resp.message.contains("asset must be a key in the transient map"));

    let resp = ledger.invoke(&Invocation::new("create").transient("asset", Vec::new()));
    assert_eq!(error_kind(&resp), "empty_transient_value");

    let resp = ledger.invoke(&Invocation::new("create").transient("asset", b"{not json".to_vec()));
    assert_eq!(error_kind(&resp), "malformed_input");
}

#[test]
fn name_in_composite_namespace_is_rejected() {
    let ledger = asset_ledger();
    let resp = ledger.invoke(&create_inv("\u{0}sneaky", "blue", 1, "tom", 1));
    assert_eq!(resp.status, STATUS_ERROR);
    assert!(snapshot(&ledger).is_empty());
}

// ============================================================================
// Transfer
// ============================================================================

#[test]
fn transfer_only_changes_owner() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let private_before = ledger.invoke(&query("readPrivateDetail", "asset1")).payload;

    assert!(ledger.invoke(&transfer_inv("asset1", "jerry")).is_ok());

    let public = payload_json(&ledger.invoke(&query("readPublic", "asset1")));
    assert_eq!(public["owner"], "jerry");
    assert_eq!(public["color"], "blue");
    assert_eq!(public["size"], 10);
    assert_eq!(
        ledger.invoke(&query("readPrivateDetail", "asset1")).payload,
        private_before
    );
    assert!(ledger.store().get_stored(PUBLIC, &index_key("blue", "asset1")).unwrap().is_some());
}

#[test]
fn transfer_to_same_owner_still_commits() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let version = ledger.store().current_version();
    assert!(ledger.invoke(&transfer_inv("asset1", "tom")).is_ok());
    assert_eq!(ledger.store().current_version(), version + 1);
}

#[test]
fn transfer_of_unknown_record() {
    let ledger = asset_ledger();
    let resp = ledger.invoke(&transfer_inv("ghost", "jerry"));
    assert_eq!(error_kind(&resp), "not_found");
    assert_eq!(resp.message, "transfer: asset does not exist: ghost");
}

#[test]
fn transfer_requires_owner() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let resp = ledger.invoke(&transfer_inv("asset1", ""));
    assert_eq!(error_kind(&resp), "invalid_field");
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn delete_removes_record_detail_and_index() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    create(&ledger, "asset2", "blue", "ann");
    assert!(ledger.invoke(&delete_inv("asset1")).is_ok());

    assert_eq!(error_kind(&ledger.invoke(&query("readPublic", "asset1"))), "not_found");
    assert_eq!(
        error_kind(&ledger.invoke(&query("readPrivateDetail", "asset1"))),
        "not_found"
    );
    assert!(ledger.store().get_stored(PUBLIC, &index_key("blue", "asset1")).unwrap().is_none());
    // The neighbour is untouched
    assert!(ledger.invoke(&query("readPublic", "asset2")).is_ok());
    assert_eq!(ledger.store().len(PUBLIC), 2);
}

#[test]
fn delete_twice_fails_the_second_time() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    assert!(ledger.invoke(&delete_inv("asset1")).is_ok());
    assert_eq!(error_kind(&ledger.invoke(&delete_inv("asset1"))), "not_found");
}

#[test]
fn recreate_after_delete_with_new_color() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    assert!(ledger.invoke(&delete_inv("asset1")).is_ok());
    create(&ledger, "asset1", "red", "ann");

    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "blue"))), Vec::<String>::new());
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "red"))), vec!["asset1"]);
}

// ============================================================================
// Car deployment
// ============================================================================

#[test]
fn car_deployment_full_lifecycle() {
    let ledger = Ledger::new(Deployment::car());
    let create = Invocation::new("create").transient_json(
        "car",
        &json!({"name": "car1", "color": "black", "tiresize": 18, "owner": "ann", "price": 30000}),
    );
    assert!(ledger.invoke(&create).is_ok());
    assert_eq!(
        payload_json(&ledger.invoke(&query("readPublic", "car1")))["tiresize"],
        18
    );

    let transfer = Invocation::new("transfer")
        .transient_json("car_owner", &json!({"name": "car1", "owner": "bob"}));
    assert!(ledger.invoke(&transfer).is_ok());

    let delete = Invocation::new("delete").transient_json("car_delete", &json!({"name": "car1"}));
    assert!(ledger.invoke(&delete).is_ok());
    assert!(ledger.store().is_empty("collectionCars"));
    assert!(ledger.store().is_empty("collectionCarPrivateDetails"));
}

#[test]
fn asset_keys_are_ignored_by_car_deployment() {
    let ledger = Ledger::new(Deployment::car());
    let resp = ledger.invoke(&create_inv("asset1", "blue", 1, "tom", 1));
    assert_eq!(error_kind(&resp), "missing_transient_key");
}
