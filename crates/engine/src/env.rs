// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

/// Resolve state directory: FORKLIFT_STATE_DIR > XDG_STATE_HOME/forklift > ~/.local/state/forklift
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("FORKLIFT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("forklift"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/forklift"))
}

/// Scratch directory for extractions and working copies
pub fn work_dir() -> PathBuf {
    std::env::var("FORKLIFT_WORK_DIR")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("forklift"))
}

/// Snapshot retention after a job completes (default 5 min)
pub fn completed_retention() -> Duration {
    millis("FORKLIFT_COMPLETED_RETENTION_MS").unwrap_or(Duration::from_secs(300))
}

/// Snapshot retention after a job fails (default 1 min)
pub fn failed_retention() -> Duration {
    millis("FORKLIFT_FAILED_RETENTION_MS").unwrap_or(Duration::from_secs(60))
}

/// Per-job branch push worker limit, never below 1
pub fn push_concurrency() -> usize {
    std::env::var("FORKLIFT_PUSH_CONCURRENCY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(4)
        .max(1)
}

/// Repository names tried before giving up, never below 1
pub fn name_attempts() -> u32 {
    std::env::var("FORKLIFT_NAME_ATTEMPTS").ok().and_then(|s| s.parse::<u32>().ok()).unwrap_or(5).max(1)
}

pub fn force_push() -> bool {
    flag("FORKLIFT_FORCE_PUSH")
}

pub fn private_repos() -> bool {
    flag("FORKLIFT_PRIVATE_REPOS")
}

/// Timeout for a single git subprocess
pub fn git_timeout() -> Duration {
    millis("FORKLIFT_GIT_TIMEOUT_MS").unwrap_or(fl_adapters::subprocess::GIT_TIMEOUT)
}

/// Token for the GitHub binding; unset means the local binding is used
pub fn github_token() -> Option<String> {
    std::env::var("FORKLIFT_GITHUB_TOKEN").ok().filter(|s| !s.is_empty())
}

fn millis(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

fn flag(name: &str) -> bool {
    std::env::var(name).ok().is_some_and(|v| parse_flag(&v))
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
