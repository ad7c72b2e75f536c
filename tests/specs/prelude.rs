// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared setup for the pipeline specs.

pub use fl_adapters::{FakeExtractor, FakeSafetyGate, FakeVcs};
pub use fl_core::test_support::zip_request;
pub use fl_core::{ErrorKind, FakeClock, Job, JobRequest, OwnerId, ProgressEvent, Stage};
pub use fl_engine::{Pipeline, PipelineConfig, PipelineDeps, Subscription};
pub use fl_storage::MemoryJobStore;
pub use std::sync::Arc;
pub use tempfile::TempDir;

pub const EPOCH_MS: u64 = 1_700_000_000_000;
pub const OWNER: &str = "usr-e2e";

/// The four-file mixed project used throughout the docs
pub fn example_project() -> FakeExtractor {
    FakeExtractor::new()
        .with_file("src/app.jsx", "export const App = () => null;")
        .with_file("api/server.js", "require('http').createServer().listen(3000);")
        .with_file("README.md", "# Example")
        .with_file("secrets.env", "password=supersecret123\n")
}

pub struct World {
    pub pipeline: Arc<Pipeline<FakeVcs, FakeClock>>,
    pub vcs: FakeVcs,
    pub store: MemoryJobStore,
    pub work: TempDir,
}

impl World {
    pub fn new(vcs: FakeVcs, extractor: FakeExtractor) -> Self {
        Self::configured(vcs, extractor, |config| config)
    }

    pub fn configured(
        vcs: FakeVcs,
        extractor: FakeExtractor,
        configure: impl FnOnce(PipelineConfig) -> PipelineConfig,
    ) -> Self {
        let store = MemoryJobStore::new();
        let work = TempDir::new().unwrap();
        let deps = PipelineDeps {
            vcs: vcs.clone(),
            store: Arc::new(store.clone()),
            extractor: Arc::new(extractor),
            gate: Arc::new(FakeSafetyGate::accepting()),
        };
        let config = configure(PipelineConfig::default().work_root(work.path()));
        let pipeline = Pipeline::new(deps, config, FakeClock::at(EPOCH_MS)).unwrap();
        Self { pipeline, vcs, store, work }
    }

    /// Run one job to its terminal stage, returning it with the events it emitted.
    pub async fn run(&self, request: JobRequest) -> (Job, Vec<ProgressEvent>) {
        let mut feed = self.pipeline.subscribe(&request.owner_id);
        let handle = self.pipeline.start(request).await.unwrap();
        let job_id = handle.job_id().clone();
        let job = handle.wait().await.unwrap();
        let events = drain(&mut feed).into_iter().filter(|e| e.job_id == job_id).collect();
        (job, events)
    }
}

pub fn drain(feed: &mut Subscription) -> Vec<ProgressEvent> {
    std::iter::from_fn(|| feed.try_recv()).collect()
}

pub fn git_available() -> bool {
    std::process::Command::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
}
