//! Multi-threaded Tests
//!
//! Many threads invoking against one ledger. Conflicts are retried the way a
//! client would resubmit a rejected transaction.

use std::sync::{Arc, Barrier};
use std::thread;

use parking_lot::Mutex;

use crate::common::*;

const THREADS: usize = 8;

/// Resubmit until the invocation is not rejected by a conflict.
fn invoke_with_retry(ledger: &Ledger, inv: &Invocation) -> Response {
    loop {
        let resp = ledger.invoke(inv);
        match &resp.error {
            Some(err) if err.is_conflict() => continue,
            _ => return resp,
        }
    }
}

fn spawn_all<F>(ledger: &Arc<Ledger>, work: F) -> Vec<Response>
where
    F: Fn(&Ledger, usize) -> Vec<Response> + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(THREADS));
    let results = Arc::new(Mutex::new(Vec::new()));
    let work = Arc::new(work);

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let ledger = Arc::clone(ledger);
            let barrier = Arc::clone(&barrier);
            let results = Arc::clone(&results);
            let work = Arc::clone(&work);
            thread::spawn(move || {
                barrier.wait();
                let out = work(ledger.as_ref(), thread_id);
                results.lock().extend(out);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    let mut collected = results.lock();
    std::mem::take(&mut *collected)
}

#[test]
fn racing_creates_of_one_name_produce_one_record() {
    let ledger = Arc::new(asset_ledger());
    let results = spawn_all(&ledger, |ledger, thread_id| {
        let color = if thread_id % 2 == 0 { "blue" } else { "red" };
        vec![ledger.invoke(&create_inv("asset1", color, 1, "tom", 1))]
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for failed in results.iter().filter(|r| !r.is_ok()) {
        let kind = error_kind(failed);
        assert!(kind == "conflict" || kind == "already_exists", "unexpected {}", kind);
    }

    assert_eq!(ledger.store().len(PUBLIC), 2);
    assert_eq!(ledger.store().len(PRIVATE), 1);
    let blue = result_keys(&ledger.invoke(&query("queryByColor", "blue")));
    let red = result_keys(&ledger.invoke(&query("queryByColor", "red")));
    assert_eq!(blue.len() + red.len(), 1);
}

#[test]
fn distinct_creates_all_commit() {
    let ledger = Arc::new(asset_ledger());
    let results = spawn_all(&ledger, |ledger, thread_id| {
        (0..5)
            .map(|i| {
                let name = format!("asset_{}_{}", thread_id, i);
                invoke_with_retry(ledger, &create_inv(&name, "green", 1, "tom", 1))
            })
            .collect()
    });

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(ledger.store().len(PRIVATE), THREADS * 5);
    let listed = result_keys(&ledger.invoke(&query("queryByColor", "green")));
    assert_eq!(listed.len(), THREADS * 5);
    let mut sorted = listed.clone();
    sorted.sort();
    assert_eq!(listed, sorted);
}

#[test]
fn contended_transfers_are_serialized() {
    let ledger = Arc::new(asset_ledger());
    create(&ledger, "asset1", "blue", "tom");
    let start = ledger.store().current_version();

    let results = spawn_all(&ledger, |ledger, thread_id| {
        (0..10)
            .map(|_| invoke_with_retry(ledger, &transfer_inv("asset1", &format!("owner{}", thread_id))))
            .collect()
    });

    assert!(results.iter().all(|r| r.is_ok()));
    // One commit version per successful transfer
    assert_eq!(ledger.store().current_version(), start + (THREADS * 10) as u64);
    let owner = payload_json(&ledger.invoke(&query("readPublic", "asset1")))["owner"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(owner.starts_with("owner"));
}

#[test]
fn create_and_delete_churn_keeps_index_consistent() {
    let ledger = Arc::new(asset_ledger());
    spawn_all(&ledger, |ledger, thread_id| {
        let name = format!("asset{}", thread_id % 4);
        (0..20)
            .map(|i| {
                if (i + thread_id) % 2 == 0 {
                    ledger.invoke(&create_inv(&name, "blue", 1, "tom", 1))
                } else {
                    ledger.invoke(&delete_inv(&name))
                }
            })
            .collect()
    });

    let live = result_keys(&ledger.invoke(&Invocation::new("rangeQuery").arg("").arg("")));
    assert_eq!(ledger.store().len(PRIVATE), live.len());
    assert_eq!(ledger.store().len(PUBLIC), live.len() * 2);
    assert_eq!(result_keys(&ledger.invoke(&query("queryByColor", "blue"))), live);
}
