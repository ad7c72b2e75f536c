// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote version control: create a repository, push branches into it.
//!
//! Whether a binding talks to a REST API or to local bare repositories, it
//! must report a taken name as [`VcsError::NameConflict`] so the publisher
//! can retry with a new name.

mod github;
mod local;

pub use github::GitHubVcs;
pub use local::LocalVcs;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("repository name already exists: {0}")]
    NameConflict(String),

    #[error("invalid repository name: {0}")]
    InvalidName(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Io(String),

    #[error("push failed: {0}")]
    Push(String),
}

impl VcsError {
    pub fn is_name_conflict(&self) -> bool {
        matches!(self, VcsError::NameConflict(_))
    }
}

/// Whether pushes may overwrite existing remote history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPolicy {
    #[default]
    Normal,
    Force,
}

fl_core::simple_display! {
    PushPolicy {
        Normal => "normal",
        Force => "force",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepository {
    pub name: String,
    pub description: String,
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub name: String,
    /// Browsable location
    pub url: String,
    /// What `git push` targets
    pub clone_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushedCommit {
    pub commit_ref: String,
}

#[async_trait]
pub trait RemoteVcs: Clone + Send + Sync + 'static {
    async fn create_repository(&self, req: &CreateRepository) -> Result<RemoteRepository, VcsError>;

    /// Publish the contents of `local_dir` as `branch` of the repository at `clone_ref`.
    async fn push_branch(
        &self,
        local_dir: &Path,
        clone_ref: &str,
        branch: &str,
        policy: PushPolicy,
    ) -> Result<PushedCommit, VcsError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CreateRepository, PushPolicy, PushedCommit, RemoteRepository, RemoteVcs, VcsError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded push
    #[derive(Debug, Clone)]
    pub struct PushCall {
        pub clone_ref: String,
        pub branch: String,
        pub policy: PushPolicy,
        /// Files present in the working copy at push time, relative and sorted
        pub files: Vec<String>,
    }

    #[derive(Default)]
    struct FakeVcsState {
        taken: HashSet<String>,
        conflicts_remaining: u32,
        create_error: Option<String>,
        failing_branches: HashSet<String>,
        push_delay: Option<Duration>,
        create_calls: Vec<CreateRepository>,
        push_calls: Vec<PushCall>,
    }

    /// Scriptable in-memory remote
    #[derive(Clone, Default)]
    pub struct FakeVcs {
        inner: Arc<Mutex<FakeVcsState>>,
    }

    impl FakeVcs {
        pub fn new() -> Self {
            Self::default()
        }

        /// The next `n` creates report a name conflict whatever the name.
        pub fn conflict_times(self, n: u32) -> Self {
            self.inner.lock().conflicts_remaining = n;
            self
        }

        /// Mark a name as already existing on the remote.
        pub fn taken(self, name: &str) -> Self {
            self.inner.lock().taken.insert(name.to_string());
            self
        }

        /// Every create fails with a non-conflict error.
        pub fn fail_create(self, message: &str) -> Self {
            self.inner.lock().create_error = Some(message.to_string());
            self
        }

        pub fn fail_branch(self, branch: &str) -> Self {
            self.inner.lock().failing_branches.insert(branch.to_string());
            self
        }

        pub fn push_delay(self, delay: Duration) -> Self {
            self.inner.lock().push_delay = Some(delay);
            self
        }

        pub fn create_calls(&self) -> Vec<CreateRepository> {
            self.inner.lock().create_calls.clone()
        }

        pub fn created_names(&self) -> Vec<String> {
            self.create_calls().into_iter().map(|c| c.name).collect()
        }

        pub fn push_calls(&self) -> Vec<PushCall> {
            self.inner.lock().push_calls.clone()
        }

        pub fn pushed_branches(&self) -> Vec<String> {
            let mut branches: Vec<String> = self.push_calls().into_iter().map(|c| c.branch).collect();
            branches.sort();
            branches
        }
    }

    fn list_files(root: &Path) -> Vec<String> {
        let mut files = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else { continue };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if let Ok(rel) = path.strip_prefix(root) {
                    files.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
        files.sort();
        files
    }

    #[async_trait]
    impl RemoteVcs for FakeVcs {
        async fn create_repository(&self, req: &CreateRepository) -> Result<RemoteRepository, VcsError> {
            let mut state = self.inner.lock();
            state.create_calls.push(req.clone());
            if let Some(message) = &state.create_error {
                return Err(VcsError::Api { status: 500, message: message.clone() });
            }
            if state.conflicts_remaining > 0 {
                state.conflicts_remaining -= 1;
                return Err(VcsError::NameConflict(req.name.clone()));
            }
            if !state.taken.insert(req.name.clone()) {
                return Err(VcsError::NameConflict(req.name.clone()));
            }
            Ok(RemoteRepository {
                name: req.name.clone(),
                url: format!("https://vcs.test/{}", req.name),
                clone_ref: format!("https://vcs.test/{}.git", req.name),
            })
        }

        async fn push_branch(
            &self,
            local_dir: &Path,
            clone_ref: &str,
            branch: &str,
            policy: PushPolicy,
        ) -> Result<PushedCommit, VcsError> {
            let delay = self.inner.lock().push_delay;
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let files = list_files(local_dir);
            let mut state = self.inner.lock();
            state.push_calls.push(PushCall {
                clone_ref: clone_ref.to_string(),
                branch: branch.to_string(),
                policy,
                files,
            });
            if state.failing_branches.contains(branch) {
                return Err(VcsError::Push(format!("remote rejected {branch}")));
            }
            Ok(PushedCommit { commit_ref: format!("c0ffee-{branch}") })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeVcs, PushCall};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
