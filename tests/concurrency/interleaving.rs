//! Interleaving Tests
//!
//! Two invocations are executed against the same committed state and then
//! committed in a chosen order.

use crate::common::*;

fn race(ledger: &Ledger, first: &Invocation, second: &Invocation) -> (Response, Response) {
    let a = ledger.begin_invocation(first);
    let b = ledger.begin_invocation(second);
    let ra = Response::from_result(ledger.commit_invocation(a));
    let rb = Response::from_result(ledger.commit_invocation(b));
    (ra, rb)
}

// ============================================================================
// Conflicting pairs
// ============================================================================

#[test]
fn duplicate_creates_first_committer_wins() {
    let ledger = asset_ledger();
    let (a, b) = race(
        &ledger,
        &create_inv("asset1", "blue", 1, "tom", 1),
        &create_inv("asset1", "red", 2, "ann", 2),
    );
    assert!(a.is_ok());
    assert_eq!(error_kind(&b), "conflict");
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "red"))), Vec::<String>::new());
    assert_eq!(ledger.store().len(PUBLIC), 2);
}

#[test]
fn concurrent_transfers_of_one_record() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let (a, b) = race(&ledger, &transfer_inv("asset1", "ann"), &transfer_inv("asset1", "bob"));
    assert!(a.is_ok());
    assert_eq!(error_kind(&b), "conflict");
    assert_eq!(payload_json(&ledger.invoke(&query("readPublic", "asset1")))["owner"], "ann");
}

#[test]
fn delete_wins_over_transfer() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let (a, b) = race(&ledger, &delete_inv("asset1"), &transfer_inv("asset1", "ann"));
    assert!(a.is_ok());
    assert_eq!(error_kind(&b), "conflict");
    // No resurrected public record without its private detail
    assert!(snapshot(&ledger).is_empty());
}

#[test]
fn transfer_wins_over_delete() {
    let ledger = asset_ledger();
    create(&ledger, "asset1", "blue", "tom");
    let (a, b) = race(&ledger, &transfer_inv("asset1", "ann"), &delete_inv("asset1"));
    assert!(a.is_ok());
    assert_eq!(error_kind(&b), "conflict");
    assert!(ledger.invoke(&query("readPrivateDetail", "asset1")).is_ok());
}

#[test]
fn query_by_color_sees_phantom_create() {
    let ledger = asset_ledger();
    create(&ledger, "a", "blue", "tom");
    let (a, b) = race(
        &ledger,
        &create_inv("b", "blue", 1, "tom", 1),
        &query("queryByColor", "blue"),
    );
    assert!(a.is_ok());
    assert_eq!(error_kind(&b), "conflict");
}

#[test]
fn range_query_sees_phantom_delete() {
    let ledger = asset_ledger();
    create(&ledger, "a", "blue", "tom");
    create(&ledger, "b", "blue", "tom");
    let (a, b) = race(
        &ledger,
        &delete_inv("b"),
        &Invocation::new("rangeQuery").arg("a").arg("z"),
    );
    assert!(a.is_ok());
    assert_eq!(error_kind(&b), "conflict");
}

// ============================================================================
// Independent pairs
// ============================================================================

#[test]
fn creates_of_different_names_both_commit() {
    let ledger = asset_ledger();
    let (a, b) = race(
        &ledger,
        &create_inv("asset1", "blue", 1, "tom", 1),
        &create_inv("asset2", "blue", 1, "tom", 1),
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "blue"))), vec!["asset1", "asset2"]);
}

#[test]
fn reads_outside_the_written_range_commit() {
    let ledger = asset_ledger();
    create(&ledger, "a", "blue", "tom");
    create(&ledger, "m", "red", "tom");
    let (a, b) = race(
        &ledger,
        &transfer_inv("m", "ann"),
        &Invocation::new("rangeQuery").arg("a").arg("b"),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(result_keys(&b), vec!["a"]);
}

#[test]
fn concurrent_hash_reads_do_not_conflict() {
    let ledger = asset_ledger();
    create(&ledger, "a", "blue", "tom");
    let (a, b) = race(&ledger, &query("hashOfPublic", "a"), &query("hashOfPrivateDetail", "a"));
    assert!(a.is_ok() && b.is_ok());
}

#[test]
fn failed_invocation_does_not_block_a_racing_one() {
    let ledger = asset_ledger();
    let (a, b) = race(
        &ledger,
        &create_inv("asset1", "blue", 0, "tom", 1),
        &create_inv("asset1", "blue", 1, "tom", 1),
    );
    assert_eq!(error_kind(&a), "invalid_field");
    assert!(b.is_ok());
}
