// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub REST binding: repositories are created through the API and
//! branches are pushed over HTTPS with the same token.

use super::{CreateRepository, PushPolicy, PushedCommit, RemoteRepository, RemoteVcs, VcsError};
use crate::git;
use crate::subprocess::GIT_TIMEOUT;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Clone)]
pub struct GitHubVcs {
    client: reqwest::Client,
    token: String,
    api_base: String,
    git_timeout: Duration,
}

impl std::fmt::Debug for GitHubVcs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubVcs").field("api_base", &self.api_base).finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct RepoResponse {
    name: String,
    html_url: String,
    clone_url: String,
}

impl GitHubVcs {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            git_timeout: GIT_TIMEOUT,
        }
    }

    /// Point at a GitHub Enterprise (or test) API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }

    fn authenticated_url(&self, clone_url: &str) -> String {
        match clone_url.strip_prefix("https://") {
            Some(rest) => format!("https://x-access-token:{}@{rest}", self.token),
            None => clone_url.to_string(),
        }
    }
}

/// Map a failed create response onto the error taxonomy.
fn create_failure(status: u16, body: String, name: &str) -> VcsError {
    if status == 422 && body.contains("name already exists") {
        VcsError::NameConflict(name.to_string())
    } else {
        VcsError::Api { status, message: body }
    }
}

#[async_trait]
impl RemoteVcs for GitHubVcs {
    async fn create_repository(&self, req: &CreateRepository) -> Result<RemoteRepository, VcsError> {
        let body = serde_json::json!({
            "name": req.name,
            "description": req.description,
            "private": req.private,
            "auto_init": false,
        });
        let resp = self
            .client
            .post(format!("{}/user/repos", self.api_base))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, "forklift")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(create_failure(status.as_u16(), text, &req.name));
        }
        let repo: RepoResponse = resp.json().await?;
        tracing::info!(name = %repo.name, url = %repo.html_url, "created GitHub repository");
        Ok(RemoteRepository { name: repo.name, url: repo.html_url, clone_ref: repo.clone_url })
    }

    async fn push_branch(
        &self,
        local_dir: &Path,
        clone_ref: &str,
        branch: &str,
        policy: PushPolicy,
    ) -> Result<PushedCommit, VcsError> {
        let remote = self.authenticated_url(clone_ref);
        let commit_ref = git::commit_and_push(local_dir, &remote, branch, policy, self.git_timeout)
            .await
            .map_err(VcsError::Push)?;
        Ok(PushedCommit { commit_ref })
    }
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
