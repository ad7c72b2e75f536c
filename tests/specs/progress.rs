// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress snapshots, retention windows, and owner-scoped streams.

use super::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn completed_snapshot_lasts_for_its_grace_window() {
    let world = World::new(FakeVcs::new(), example_project());
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    let snapshot = world.pipeline.snapshot(&job.id).unwrap();
    assert!(snapshot.completed);
    assert_eq!(snapshot.percent, 100);

    tokio::time::advance(Duration::from_secs(299)).await;
    assert!(world.pipeline.snapshot(&job.id).is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(world.pipeline.snapshot(&job.id).is_none());
    assert!(world.store.snapshot(&job.owner_id, &job.id).is_some(), "the stored record outlives the snapshot");
}

#[tokio::test(start_paused = true)]
async fn failed_snapshot_uses_the_shorter_window() {
    let world = World::new(FakeVcs::new().conflict_times(5), example_project());
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;
    assert_eq!(job.stage, Stage::Failed);

    tokio::time::advance(Duration::from_secs(59)).await;
    let snapshot = world.pipeline.snapshot(&job.id).unwrap();
    assert!(snapshot.has_error);
    assert!(!snapshot.message.is_empty());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(world.pipeline.snapshot(&job.id).is_none());
}

#[tokio::test(start_paused = true)]
async fn retention_windows_follow_config() {
    let world = World::configured(FakeVcs::new(), example_project(), |c| {
        c.completed_retention(Duration::from_secs(10))
    });
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    tokio::time::advance(Duration::from_secs(11)).await;
    assert!(world.pipeline.snapshot(&job.id).is_none());
}

#[tokio::test]
async fn subscribers_only_see_their_own_jobs() {
    let world = World::new(FakeVcs::new(), example_project());
    let mut alice = world.pipeline.subscribe(&OwnerId::new("usr-alice"));
    let mut bob = world.pipeline.subscribe(&OwnerId::new("usr-bob"));

    let a = world.pipeline.start(zip_request("usr-alice", "alpha.zip")).await.unwrap();
    let b = world.pipeline.start(zip_request("usr-bob", "beta.zip")).await.unwrap();
    let (a_id, b_id) = (a.job_id().clone(), b.job_id().clone());
    a.wait().await.unwrap();
    b.wait().await.unwrap();

    let alice_events = drain(&mut alice);
    let bob_events = drain(&mut bob);
    assert!(!alice_events.is_empty());
    assert!(alice_events.iter().all(|e| e.job_id == a_id && e.owner_id == "usr-alice"));
    assert!(bob_events.iter().all(|e| e.job_id == b_id && e.owner_id == "usr-bob"));
    assert!(alice_events.last().unwrap().completed);
    assert!(bob_events.last().unwrap().completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_jobs_keep_per_job_order() {
    let world = World::new(FakeVcs::new(), example_project());
    let mut feed = world.pipeline.subscribe(&OwnerId::new(OWNER));

    let mut handles = Vec::new();
    for n in 0..6 {
        handles.push(world.pipeline.start(zip_request(OWNER, &format!("app-{n}.zip"))).await.unwrap());
    }
    for handle in handles {
        assert_eq!(handle.wait().await.unwrap().stage, Stage::Completed);
    }

    let mut by_job: HashMap<_, Vec<ProgressEvent>> = HashMap::new();
    for event in drain(&mut feed) {
        by_job.entry(event.job_id.clone()).or_default().push(event);
    }
    assert_eq!(by_job.len(), 6);
    for events in by_job.values() {
        assert_eq!(events.first().unwrap().stage, Stage::Uploaded);
        assert!(events.last().unwrap().completed);
        assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
    }

    let mut names = world.vcs.created_names();
    names.sort();
    assert_eq!(names, vec!["app-0", "app-1", "app-2", "app-3", "app-4", "app-5"]);
}
