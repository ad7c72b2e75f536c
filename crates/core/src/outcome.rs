// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish results: one record per planned branch, aggregated per job.

use serde::{Deserialize, Serialize};

/// Result of materializing and pushing a single branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPublishResult {
    pub branch_name: String,
    /// Where the branch's working copy was materialized (removed after push)
    pub working_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_ref: Option<String>,
    pub pushed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BranchPublishResult {
    pub fn pushed(branch: impl Into<String>, working_dir: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            branch_name: branch.into(),
            working_dir: working_dir.into(),
            commit_ref: Some(commit.into()),
            pushed: true,
            error: None,
        }
    }

    pub fn failed(branch: impl Into<String>, working_dir: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            branch_name: branch.into(),
            working_dir: working_dir.into(),
            commit_ref: None,
            pushed: false,
            error: Some(error.into()),
        }
    }
}

/// Terminal artifact of a job whose repository was created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub repository_url: String,
    pub clone_url: String,
    /// The name that was finally accepted by the remote
    pub attempted_name: String,
    pub name_retry_count: u32,
    pub branch_results: Vec<BranchPublishResult>,
}

impl PublishOutcome {
    pub fn pushed_count(&self) -> usize {
        self.branch_results.iter().filter(|r| r.pushed).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &BranchPublishResult> {
        self.branch_results.iter().filter(|r| !r.pushed)
    }

    pub fn is_partial(&self) -> bool {
        self.failures().next().is_some()
    }
}
