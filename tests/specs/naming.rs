// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository name conflicts and retries.

use super::prelude::*;
use std::collections::HashSet;

#[tokio::test]
async fn five_conflicts_exhaust_the_name_budget() {
    let world = World::new(FakeVcs::new().conflict_times(5), example_project());
    let (job, events) = world.run(zip_request(OWNER, "example.zip")).await;

    assert_eq!(job.stage, Stage::Failed);
    assert_eq!(job.error_kind, Some(ErrorKind::RepositoryNameExhausted));
    assert!(job.result.is_none());

    let names = world.vcs.created_names();
    assert_eq!(names.len(), 5);
    assert_eq!(names.iter().collect::<HashSet<_>>().len(), 5);
    assert_eq!(names[0], "example");
    assert!(world.vcs.push_calls().is_empty());

    let last = events.last().unwrap();
    assert!(last.has_error);
    assert_eq!(last.stage, Stage::Failed);
}

#[tokio::test]
async fn fifth_attempt_still_succeeds() {
    let world = World::new(FakeVcs::new().conflict_times(4), example_project());
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    assert_eq!(job.stage, Stage::Completed);
    let outcome = job.result.unwrap();
    assert_eq!(outcome.name_retry_count, 4);
    assert!(outcome.attempted_name.starts_with("example-1700000000-"), "{}", outcome.attempted_name);
    assert!(outcome.attempted_name.ends_with("-4"), "{}", outcome.attempted_name);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_uploads_of_one_name_all_publish() {
    let world = World::new(FakeVcs::new(), example_project());

    let mut handles = Vec::new();
    for _ in 0..6 {
        handles.push(world.pipeline.start(zip_request(OWNER, "example.zip")).await.unwrap());
    }
    let mut jobs = Vec::new();
    for handle in handles {
        jobs.push(handle.wait().await.unwrap());
    }

    let stages: Vec<Stage> = jobs.iter().map(|j| j.stage).collect();
    assert!(stages.iter().all(|s| *s == Stage::Completed), "{stages:?}");
    let names: HashSet<String> = jobs.into_iter().map(|j| j.result.unwrap().attempted_name).collect();
    assert_eq!(names.len(), 6);
    assert!(names.contains("example"));
    assert!(world.vcs.created_names().len() <= 11);
}

#[tokio::test]
async fn attempt_budget_follows_config() {
    let world = World::configured(FakeVcs::new().conflict_times(10), example_project(), |c| c.name_attempts(2));
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    assert_eq!(job.error_kind, Some(ErrorKind::RepositoryNameExhausted));
    assert_eq!(world.vcs.created_names().len(), 2);
}

#[tokio::test]
async fn upload_name_is_cleaned_before_use() {
    let world = World::new(FakeVcs::new(), example_project());
    let (job, _) = world.run(zip_request(OWNER, "My Project (2) - Copy.zip")).await;

    assert_eq!(job.result.unwrap().attempted_name, "my-project");
}

#[tokio::test]
async fn remote_error_fails_without_retrying() {
    let world = World::new(FakeVcs::new().fail_create("quota exceeded"), example_project());
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    assert_eq!(job.error_kind, Some(ErrorKind::Repository));
    assert!(job.error_message.unwrap().contains("quota exceeded"));
    assert_eq!(world.vcs.created_names().len(), 1);
}
