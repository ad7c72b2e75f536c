// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn req(name: &str) -> CreateRepository {
    CreateRepository { name: name.into(), description: "demo upload".into(), private: false }
}

#[tokio::test]
async fn second_create_with_same_name_conflicts() {
    let tmp = tempfile::tempdir().unwrap();
    let vcs = LocalVcs::new(tmp.path());

    let repo = vcs.create_repository(&req("demo")).await.unwrap();
    assert!(repo.clone_ref.ends_with("demo.git"));
    assert!(tmp.path().join("demo.git/HEAD").exists());

    let err = vcs.create_repository(&req("demo")).await.unwrap_err();
    assert!(err.is_name_conflict());
}

#[yare::parameterized(
    empty      = { "" },
    dot_prefix = { ".hidden" },
    slash      = { "a/b" },
    space      = { "a b" },
)]
fn invalid_names_are_rejected(name: &str) {
    assert!(matches!(validate_name(name), Err(VcsError::InvalidName(_))));
}

#[tokio::test]
async fn pushes_branch_into_created_repository() {
    let tmp = tempfile::tempdir().unwrap();
    let vcs = LocalVcs::new(tmp.path().join("remotes"));
    let repo = vcs.create_repository(&req("site")).await.unwrap();

    let work = tmp.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::write(work.join("index.html"), "<html></html>").unwrap();

    let pushed = vcs.push_branch(&work, &repo.clone_ref, "frontend", PushPolicy::Normal).await.unwrap();
    assert!(!pushed.commit_ref.is_empty());
}
