// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-level failures and per-branch partial failure.

use super::prelude::*;
use fl_core::Upload;

fn three_branch_project() -> FakeExtractor {
    FakeExtractor::new()
        .with_file("package.json", "{}")
        .with_file("src/app.jsx", "export const App = () => null;")
        .with_file("api/server.js", "listen()")
}

#[tokio::test]
async fn one_failed_push_still_completes_the_job() {
    let world = World::new(FakeVcs::new().fail_branch("backend"), three_branch_project());
    let (job, events) = world.run(zip_request(OWNER, "shop.zip")).await;

    assert_eq!(job.stage, Stage::Completed);
    let outcome = job.result.as_ref().unwrap();
    assert_eq!(outcome.branch_results.len(), 3);
    assert_eq!(outcome.pushed_count(), 2);
    assert!(outcome.is_partial());

    let failed: Vec<&str> = outcome.failures().map(|r| r.branch_name.as_str()).collect();
    assert_eq!(failed, vec!["backend"]);
    assert!(outcome.failures().all(|r| r.error.is_some() && r.commit_ref.is_none()));

    let last = events.last().unwrap();
    assert!(last.completed);
    assert!(!last.has_error);
}

#[tokio::test]
async fn extraction_error_is_recorded_on_the_job() {
    let world = World::new(FakeVcs::new(), FakeExtractor::new().failing("corrupt archive"));
    let (job, events) = world.run(zip_request(OWNER, "broken.zip")).await;

    assert_eq!(job.stage, Stage::Failed);
    assert_eq!(job.error_kind, Some(ErrorKind::Extraction));
    assert!(job.error_message.as_deref().unwrap().contains("corrupt archive"));
    assert!(world.vcs.create_calls().is_empty());

    let snapshot = world.pipeline.snapshot(&job.id).unwrap();
    assert!(snapshot.has_error);
    assert_eq!(snapshot.percent, events.last().unwrap().percent);
}

#[tokio::test]
async fn invalid_upload_never_becomes_a_job() {
    let world = World::new(FakeVcs::new(), example_project());
    let request = JobRequest::new(OWNER, Upload::new("notes.txt", "/tmp/notes.txt", 10));

    let err = world.pipeline.start(request).await.err().unwrap();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(world.store.is_empty());
}

#[tokio::test]
async fn stages_never_regress() {
    let world = World::new(FakeVcs::new().fail_branch("docs"), example_project());
    let (_, events) = world.run(zip_request(OWNER, "example.zip")).await;

    let ordinals: Vec<usize> = events.iter().filter_map(|e| e.stage.ordinal()).collect();
    assert!(ordinals.windows(2).all(|w| w[0] <= w[1]), "{ordinals:?}");
    assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
}
