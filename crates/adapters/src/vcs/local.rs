// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bare repositories on the local filesystem.

use super::{CreateRepository, PushPolicy, PushedCommit, RemoteRepository, RemoteVcs, VcsError};
use crate::git;
use crate::subprocess::GIT_TIMEOUT;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Each repository is `<root>/<name>.git`; an existing directory is a name conflict.
#[derive(Debug, Clone)]
pub struct LocalVcs {
    root: PathBuf,
    git_timeout: Duration,
}

impl LocalVcs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), git_timeout: GIT_TIMEOUT }
    }

    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn validate_name(name: &str) -> Result<(), VcsError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(VcsError::InvalidName(name.to_string()))
    }
}

#[async_trait]
impl RemoteVcs for LocalVcs {
    async fn create_repository(&self, req: &CreateRepository) -> Result<RemoteRepository, VcsError> {
        validate_name(&req.name)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| VcsError::Io(format!("failed to create {}: {e}", self.root.display())))?;

        let path = self.root.join(format!("{}.git", req.name));
        // create_dir is the atomic claim on the name
        match tokio::fs::create_dir(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(VcsError::NameConflict(req.name.clone()));
            }
            Err(e) => {
                return Err(VcsError::Io(format!("failed to create {}: {e}", path.display())));
            }
        }

        if let Err(e) = git::init_bare(&path, self.git_timeout).await {
            let _ = tokio::fs::remove_dir_all(&path).await;
            return Err(VcsError::Io(e));
        }
        if !req.description.is_empty() {
            let _ = tokio::fs::write(path.join("description"), format!("{}\n", req.description)).await;
        }

        tracing::info!(name = %req.name, path = %path.display(), "created local repository");
        let location = path.display().to_string();
        Ok(RemoteRepository { name: req.name.clone(), url: location.clone(), clone_ref: location })
    }

    async fn push_branch(
        &self,
        local_dir: &Path,
        clone_ref: &str,
        branch: &str,
        policy: PushPolicy,
    ) -> Result<PushedCommit, VcsError> {
        let commit_ref = git::commit_and_push(local_dir, clone_ref, branch, policy, self.git_timeout)
            .await
            .map_err(VcsError::Push)?;
        Ok(PushedCommit { commit_ref })
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
