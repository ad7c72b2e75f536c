// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The mixed four-file project, end to end.

use super::prelude::*;
use fl_classify::{Classifier, FileTree};
use similar_asserts::assert_eq;

fn files(plan: &fl_core::BranchPlan, branch: &str) -> Vec<String> {
    plan.branch_files(branch).unwrap().iter().cloned().collect()
}

#[tokio::test]
async fn mixed_project_is_split_into_four_branches() {
    let world = World::new(FakeVcs::new(), example_project());
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    assert_eq!(job.stage, Stage::Completed);
    let plan = job.analysis.as_ref().unwrap();
    assert_eq!(plan.branch_names(), vec!["main", "frontend", "backend", "docs"]);
    assert_eq!(files(plan, "main"), vec!["README.md", "api/server.js", "secrets.env", "src/app.jsx"]);
    assert_eq!(files(plan, "frontend"), vec!["src/app.jsx"]);
    assert_eq!(files(plan, "backend"), vec!["api/server.js"]);
    assert_eq!(files(plan, "docs"), vec!["README.md"]);
    assert_eq!(plan.conflicts.secret_bearing, vec!["secrets.env"]);

    let outcome = job.result.as_ref().unwrap();
    assert_eq!(outcome.attempted_name, "example");
    assert_eq!(outcome.pushed_count(), 4);
    assert_eq!(world.vcs.pushed_branches(), vec!["backend", "docs", "frontend", "main"]);
}

#[tokio::test]
async fn every_branch_gets_a_readme_and_gitignore() {
    let world = World::new(FakeVcs::new(), example_project());
    world.run(zip_request(OWNER, "example.zip")).await;

    for call in world.vcs.push_calls() {
        assert!(call.files.contains(&".gitignore".to_string()), "{} has no .gitignore", call.branch);
        assert!(call.files.contains(&"README.md".to_string()), "{} has no README.md", call.branch);
    }
    let backend = world.vcs.push_calls().into_iter().find(|c| c.branch == "backend").unwrap();
    assert_eq!(backend.files, vec![".gitignore", "README.md", "api/server.js"]);
}

#[tokio::test]
async fn stored_record_matches_the_returned_job() {
    let world = World::new(FakeVcs::new(), example_project());
    let (job, _) = world.run(zip_request(OWNER, "example.zip")).await;

    let stored = world.pipeline.job(&job.owner_id, &job.id).await.unwrap().unwrap();
    assert_eq!(stored, job);
    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(json["stage"], "COMPLETED");
    assert_eq!(json["result"]["branchResults"].as_array().unwrap().len(), 4);
}

#[test]
fn classification_is_deterministic() {
    let build = || {
        FileTree::builder()
            .file("src/app.jsx", "export const App = () => null;")
            .file("api/server.js", "listen()")
            .file("lib/config.json", "{}")
            .file("tools/config.json", "{\"a\":1}")
            .file("README.md", "# Example")
            .build()
    };
    let classifier = Classifier::new().unwrap();

    let first = classifier.classify(&build());
    let second = classifier.classify(&build());

    assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    assert_eq!(first.main_files().len(), 5);
    assert!(!first.conflicts.duplicates[0].same_content);
}

#[test]
fn main_always_holds_every_file() {
    let tree = FileTree::builder()
        .file("docs/guide.md", "# Guide")
        .file("Dockerfile", "FROM scratch")
        .file("notes.bin", [0u8, 1, 2])
        .build();
    let plan = Classifier::new().unwrap().classify(&tree);

    let all: Vec<&str> = tree.paths().collect();
    let main: Vec<&str> = plan.main_files().iter().map(String::as_str).collect();
    assert_eq!(main, all);
}
