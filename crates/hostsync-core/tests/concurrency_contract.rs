//! Contract Test: Concurrent Mutations
//!
//! Every mutation holds the directory's writer lock from load to reload, so
//! concurrent requests cannot lose each other's updates.

mod common;

use common::*;
use hostsync_core::HostRecord;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_are_all_persisted() {
    let harness = Arc::new(Harness::new(Vec::new()));
    harness.backend.yield_on_read(true);

    let mut handles = Vec::new();
    for n in 0..20 {
        let harness = Arc::clone(&harness);
        handles.push(tokio::spawn(async move {
            harness
                .directory
                .add(&format!("host{}.lan", n), &format!("10.0.1.{}", n))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let hosts = harness.backend.hosts().await;
    assert_eq!(hosts.len(), 20);

    let ids: HashSet<u64> = hosts.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=20).collect::<HashSet<_>>());

    // The last synchronization saw the final directory
    assert_eq!(harness.sink.contents().await.lines().count(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_edits_and_deletes_do_not_resurrect_records() {
    let initial: Vec<HostRecord> = (1..=10)
        .map(|n| HostRecord::new(n, format!("h{}", n), format!("10.0.0.{}", n)))
        .collect();
    let harness = Arc::new(Harness::new(initial));
    harness.backend.yield_on_read(true);

    let mut handles = Vec::new();
    for n in 1..=10u64 {
        let harness = Arc::clone(&harness);
        handles.push(tokio::spawn(async move {
            if n % 2 == 0 {
                harness.directory.delete(n).await.map(|_| ())
            } else {
                harness
                    .directory
                    .edit(n, &format!("h{}", n), "192.168.0.1")
                    .await
                    .map(|_| ())
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let hosts = harness.backend.hosts().await;
    assert_eq!(hosts.len(), 5);
    assert!(hosts.iter().all(|r| r.id % 2 == 1 && r.ip == "192.168.0.1"));
}
