// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! git CLI helpers shared by the RemoteVcs bindings.

use crate::subprocess::run_checked;
use crate::vcs::PushPolicy;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

const AUTHOR_NAME: &str = "forklift";
const AUTHOR_EMAIL: &str = "forklift@localhost";

fn git(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(dir)
        .args(["-c", "commit.gpgsign=false"])
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

/// Create an empty bare repository at `path`.
pub async fn init_bare(path: &Path, timeout: Duration) -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.args(["init", "--bare", "-q"]).arg(path);
    run_checked(cmd, timeout, "git init --bare").await.map(|_| ())
}

/// Commit everything in `dir` as a single commit on `branch` and push it.
///
/// Returns the short hash of the pushed commit. The remote URL is passed
/// on the command line and never written into the working copy's config.
pub async fn commit_and_push(
    dir: &Path,
    remote_url: &str,
    branch: &str,
    policy: PushPolicy,
    timeout: Duration,
) -> Result<String, String> {
    let steps: [(&[&str], &str); 5] = [
        (&["init", "-q"], "git init"),
        (&["checkout", "-q", "-b", branch], "git checkout"),
        (&["config", "user.name", AUTHOR_NAME], "git config"),
        (&["config", "user.email", AUTHOR_EMAIL], "git config"),
        (&["add", "-A"], "git add"),
    ];
    for (args, label) in steps {
        let mut cmd = git(dir);
        cmd.args(args);
        run_checked(cmd, timeout, label).await?;
    }

    let mut commit = git(dir);
    commit.args(["commit", "-q", "-m", &format!("Add {branch} components")]);
    run_checked(commit, timeout, "git commit").await?;

    let mut rev = git(dir);
    rev.args(["rev-parse", "--short", "HEAD"]);
    let output = run_checked(rev, timeout, "git rev-parse").await?;
    let commit_ref = String::from_utf8_lossy(&output.stdout).trim().to_string();

    let mut push = git(dir);
    push.arg("push").arg("-q");
    if policy == PushPolicy::Force {
        push.arg("--force");
    }
    push.arg(remote_url).arg(format!("HEAD:refs/heads/{branch}"));
    run_checked(push, timeout, "git push").await.map_err(|e| redact(&e, remote_url))?;

    tracing::debug!(branch, commit = %commit_ref, "pushed branch");
    Ok(commit_ref)
}

/// Strip credentials from a remote URL that git may have echoed.
fn redact(message: &str, remote_url: &str) -> String {
    match remote_url.split_once('@') {
        Some((creds, _)) if creds.contains("://") => message.replace(creds, "https://***"),
        _ => message.to_string(),
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
