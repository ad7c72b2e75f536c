// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A real run: project directory in, bare git repositories out.

use super::prelude::*;
use fl_adapters::{DirectoryExtractor, ExtensionSafetyGate, LocalVcs};
use fl_core::upload::DIRECTORY_CONTENT_TYPE;
use fl_core::{SystemClock, Upload};
use fl_storage::{FileJobStore, JobStore};
use std::path::Path;
use std::process::Command;

struct LocalWorld {
    pipeline: Arc<Pipeline<LocalVcs, SystemClock>>,
    source: TempDir,
    remotes: TempDir,
    state: TempDir,
    _work: TempDir,
}

impl LocalWorld {
    fn new() -> Self {
        let source = TempDir::new().unwrap();
        let remotes = TempDir::new().unwrap();
        let state = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let deps = PipelineDeps {
            vcs: LocalVcs::new(remotes.path()),
            store: Arc::new(FileJobStore::new(state.path())),
            extractor: Arc::new(DirectoryExtractor),
            gate: Arc::new(ExtensionSafetyGate::new()),
        };
        let config = PipelineConfig::default().work_root(work.path());
        let pipeline = Pipeline::new(deps, config, SystemClock).unwrap();
        Self { pipeline, source, remotes, state, _work: work }
    }

    fn file(&self, path: &str, contents: &str) {
        let full = self.source.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, contents).unwrap();
    }

    fn request(&self, name: &str) -> JobRequest {
        let upload = Upload::new("shop", self.source.path(), 1024).with_content_type(DIRECTORY_CONTENT_TYPE);
        JobRequest::new(OWNER, upload).with_repo_name(name)
    }
}

fn git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git").arg("--git-dir").arg(repo).args(args).output().unwrap();
    assert!(output.status.success(), "git {args:?}: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn shop(world: &LocalWorld) {
    world.file("package.json", r#"{"dependencies":{"react":"^18"}}"#);
    world.file("src/App.jsx", "export default function App() { return null; }");
    world.file("server/index.js", "require('http').createServer().listen(8080);");
    world.file("docs/setup.md", "# Setup");
}

#[tokio::test]
async fn branches_land_in_a_bare_repository() {
    if !git_available() {
        return;
    }
    let world = LocalWorld::new();
    shop(&world);

    let job = world.pipeline.start(world.request("shop")).await.unwrap().wait().await.unwrap();
    assert_eq!(job.stage, Stage::Completed, "{:?}", job.error_message);

    let repo = world.remotes.path().join("shop.git");
    let heads = git(&repo, &["for-each-ref", "--format=%(refname:short)", "refs/heads"]);
    assert_eq!(heads.lines().collect::<Vec<_>>(), vec!["backend", "docs", "frontend", "main"]);

    let main_tree = git(&repo, &["ls-tree", "-r", "--name-only", "main"]);
    for path in ["package.json", "src/App.jsx", "server/index.js", "docs/setup.md", "README.md", ".gitignore"] {
        assert!(main_tree.lines().any(|l| l == path), "main is missing {path}:\n{main_tree}");
    }
    let readme = git(&repo, &["show", "frontend:README.md"]);
    assert!(readme.starts_with("# shop (frontend branch)"), "{readme}");

    let outcome = job.result.unwrap();
    assert!(outcome.branch_results.iter().all(|r| r.pushed && r.commit_ref.is_some()));
}

#[tokio::test]
async fn job_record_is_written_to_the_state_directory() {
    if !git_available() {
        return;
    }
    let world = LocalWorld::new();
    shop(&world);

    let job = world.pipeline.start(world.request("shop")).await.unwrap().wait().await.unwrap();

    let store = FileJobStore::new(world.state.path());
    let stored = store.get(&job.owner_id, &job.id).await.unwrap().unwrap();
    assert_eq!(stored, job);
    assert!(world.state.path().join(OWNER).join(format!("{}.json", job.id)).is_file());

    assert!(world.pipeline.delete_job(&job.owner_id, &job.id).await.unwrap());
    assert!(store.get(&job.owner_id, &job.id).await.unwrap().is_none());
}

#[tokio::test]
async fn existing_repository_forces_a_new_name() {
    if !git_available() {
        return;
    }
    let world = LocalWorld::new();
    shop(&world);

    let first = world.pipeline.start(world.request("shop")).await.unwrap().wait().await.unwrap();
    let second = world.pipeline.start(world.request("shop")).await.unwrap().wait().await.unwrap();

    assert_eq!(first.result.unwrap().attempted_name, "shop");
    let outcome = second.result.unwrap();
    assert!(outcome.attempted_name.starts_with("shop-"), "{}", outcome.attempted_name);
    assert_eq!(outcome.name_retry_count, 1);
    assert!(world.remotes.path().join(format!("{}.git", outcome.attempted_name)).is_dir());
}
