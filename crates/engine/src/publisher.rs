// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch publisher: working copies, repository creation, branch pushes.
//!
//! The three steps are separate calls so the orchestrator can report a
//! stage around each one. Working copies live under a single temporary
//! directory owned by [`Workspace`]; dropping it removes every copy, whether
//! the job finished or bailed out half way.

use crate::config::PipelineConfig;
use crate::generated::{self, BranchSummary};
use fl_adapters::{CreateRepository, PushPolicy, RemoteRepository, RemoteVcs};
use fl_core::{retry_name, BranchPlan, BranchPublishResult, BranchPushError, Clock, PipelineError};
use futures_util::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// One branch's isolated copy of its files
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    pub branch: String,
    pub dir: PathBuf,
    /// Set when the copy could not be fully written; the branch is not pushed
    pub error: Option<String>,
}

/// Scoped owner of every working copy for one job
#[derive(Debug)]
pub struct Workspace {
    root: TempDir,
    copies: Vec<WorkingCopy>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Copies in plan order, `main` first
    pub fn copies(&self) -> &[WorkingCopy] {
        &self.copies
    }
}

/// Accepted repository plus how many names were rejected before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRepository {
    pub repository: RemoteRepository,
    pub retries: u32,
}

pub struct BranchPublisher<V: RemoteVcs, C: Clock> {
    vcs: V,
    clock: C,
    name_attempts: u32,
    push_concurrency: usize,
    push_policy: PushPolicy,
    private_repos: bool,
    work_root: PathBuf,
}

impl<V: RemoteVcs, C: Clock> BranchPublisher<V, C> {
    pub fn new(vcs: V, clock: C, config: &PipelineConfig) -> Self {
        Self {
            vcs,
            clock,
            name_attempts: config.name_attempts.max(1),
            push_concurrency: config.push_concurrency.max(1),
            push_policy: config.push_policy,
            private_repos: config.private_repos,
            work_root: config.work_root.clone(),
        }
    }

    /// Write each branch's files plus generated README and `.gitignore`.
    ///
    /// Existing `README.md` or `.gitignore` files at a branch root are kept.
    /// A branch whose files cannot be copied is recorded with an error and
    /// skipped at push time; only failing to create the root is fatal.
    pub async fn materialize(
        &self,
        plan: &BranchPlan,
        source_root: &Path,
        project: &str,
    ) -> Result<Workspace, PipelineError> {
        let job = MaterializeJob {
            branches: plan.branches().map(|(name, files)| (name.to_string(), files.iter().cloned().collect())).collect(),
            languages: plan.detected_languages.iter().cloned().collect(),
            frameworks: plan.detected_frameworks.iter().cloned().collect(),
            source_root: source_root.to_path_buf(),
            work_root: self.work_root.clone(),
            project: project.to_string(),
        };
        tokio::task::spawn_blocking(move || job.run())
            .await
            .map_err(|e| PipelineError::Workspace(e.to_string()))?
    }

    /// Create the remote repository, retrying with fresh names on conflict.
    ///
    /// The first attempt uses `base_name` as is; later ones append the
    /// current epoch seconds, the job's `tag`, and the attempt number. Any
    /// error other than a name conflict stops immediately.
    pub async fn create_repository(
        &self,
        base_name: &str,
        tag: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> Result<CreatedRepository, PipelineError> {
        let mut last_name = base_name.to_string();
        for attempt in 0..self.name_attempts {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            let name = if attempt == 0 {
                base_name.to_string()
            } else {
                retry_name(base_name, self.clock.epoch_secs(), tag, attempt)
            };
            let request = CreateRepository {
                name: name.clone(),
                description: description.to_string(),
                private: self.private_repos,
            };
            match self.vcs.create_repository(&request).await {
                Ok(repository) => {
                    tracing::info!(name = %repository.name, attempt, "repository created");
                    return Ok(CreatedRepository { repository, retries: attempt });
                }
                Err(e) if e.is_name_conflict() => {
                    tracing::warn!(name = %name, attempt, "repository name taken, retrying");
                    last_name = name;
                }
                Err(e) => return Err(PipelineError::Repository(e.to_string())),
            }
        }
        Err(PipelineError::RepositoryNameExhausted { attempts: self.name_attempts, last_name })
    }

    /// Push every working copy, independently and with bounded concurrency.
    ///
    /// Results come back in plan order whatever order the pushes finish in.
    /// A branch not yet started when `cancel` trips is recorded as cancelled.
    pub async fn push_all(
        &self,
        workspace: &Workspace,
        repository: &RemoteRepository,
        cancel: &CancellationToken,
    ) -> Vec<BranchPublishResult> {
        let pushes: Vec<_> = workspace
            .copies
            .iter()
            .enumerate()
            .map(|(index, copy)| {
                let push = self.push_one(copy, repository, cancel);
                async move { (index, push.await) }
            })
            .collect();
        let mut results: Vec<(usize, BranchPublishResult)> = stream::iter(pushes)
            .buffer_unordered(self.push_concurrency)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }

    async fn push_one(
        &self,
        copy: &WorkingCopy,
        repository: &RemoteRepository,
        cancel: &CancellationToken,
    ) -> BranchPublishResult {
        let dir = copy.dir.display().to_string();
        let outcome = match &copy.error {
            Some(reason) => Err(BranchPushError::new(&copy.branch, reason.clone())),
            None if cancel.is_cancelled() => Err(BranchPushError::cancelled(&copy.branch)),
            None => self
                .vcs
                .push_branch(&copy.dir, &repository.clone_ref, &copy.branch, self.push_policy)
                .await
                .map_err(|e| BranchPushError::new(&copy.branch, e.to_string())),
        };
        match outcome {
            Ok(commit) => {
                tracing::info!(branch = %copy.branch, commit = %commit.commit_ref, "branch pushed");
                BranchPublishResult::pushed(&copy.branch, dir, commit.commit_ref)
            }
            Err(e) => {
                tracing::warn!(branch = %copy.branch, error = %e, "branch not pushed");
                BranchPublishResult::failed(&copy.branch, dir, e.reason)
            }
        }
    }
}

/// Owned inputs for the blocking copy
struct MaterializeJob {
    branches: Vec<(String, Vec<String>)>,
    languages: std::collections::BTreeSet<String>,
    frameworks: std::collections::BTreeSet<String>,
    source_root: PathBuf,
    work_root: PathBuf,
    project: String,
}

impl MaterializeJob {
    fn run(self) -> Result<Workspace, PipelineError> {
        std::fs::create_dir_all(&self.work_root)
            .map_err(|e| PipelineError::Workspace(format!("{}: {e}", self.work_root.display())))?;
        let root = tempfile::Builder::new()
            .prefix("publish-")
            .tempdir_in(&self.work_root)
            .map_err(|e| PipelineError::Workspace(format!("{}: {e}", self.work_root.display())))?;

        let names: Vec<String> = self.branches.iter().map(|(name, _)| name.clone()).collect();
        let mut copies = Vec::with_capacity(self.branches.len());
        for (branch, files) in &self.branches {
            let dir = root.path().join(branch);
            let others: Vec<String> = names.iter().filter(|n| *n != branch).cloned().collect();
            let summary = BranchSummary {
                project: &self.project,
                branch,
                file_count: files.len(),
                other_branches: &others,
                languages: &self.languages,
                frameworks: &self.frameworks,
            };
            let error = self.write_branch(&dir, files, &summary).err();
            if let Some(reason) = &error {
                tracing::warn!(branch = %branch, error = %reason, "working copy incomplete");
            }
            copies.push(WorkingCopy { branch: branch.clone(), dir, error });
        }
        Ok(Workspace { root, copies })
    }

    fn write_branch(&self, dir: &Path, files: &[String], summary: &BranchSummary<'_>) -> Result<(), String> {
        std::fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
        for rel in files {
            let from = self.source_root.join(rel);
            let to = dir.join(rel);
            if let Some(parent) = to.parent() {
                std::fs::create_dir_all(parent).map_err(|e| format!("{}: {e}", parent.display()))?;
            }
            std::fs::copy(&from, &to).map_err(|e| format!("{rel}: {e}"))?;
        }
        write_if_absent(&dir.join(generated::README_FILE), &generated::readme(summary))?;
        write_if_absent(&dir.join(generated::GITIGNORE_FILE), &generated::gitignore(summary.branch))
    }
}

fn write_if_absent(path: &Path, contents: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, contents).map_err(|e| format!("{}: {e}", path.display()))
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
