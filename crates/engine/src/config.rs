// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline tuning knobs.

use fl_adapters::PushPolicy;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory (set FORKLIFT_STATE_DIR)")]
    NoStateDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// How long a completed job's snapshot stays pollable
    pub completed_retention: Duration,
    /// How long a failed job's snapshot stays pollable
    pub failed_retention: Duration,
    pub push_concurrency: usize,
    pub name_attempts: u32,
    pub push_policy: PushPolicy,
    pub private_repos: bool,
    /// Parent of per-job extraction directories and working copies
    pub work_root: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            completed_retention: Duration::from_secs(300),
            failed_retention: Duration::from_secs(60),
            push_concurrency: 4,
            name_attempts: 5,
            push_policy: PushPolicy::Normal,
            private_repos: false,
            work_root: std::env::temp_dir().join("forklift"),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        Self {
            completed_retention: crate::env::completed_retention(),
            failed_retention: crate::env::failed_retention(),
            push_concurrency: crate::env::push_concurrency(),
            name_attempts: crate::env::name_attempts(),
            push_policy: if crate::env::force_push() { PushPolicy::Force } else { PushPolicy::Normal },
            private_repos: crate::env::private_repos(),
            work_root: crate::env::work_dir(),
        }
    }

    fl_core::setters! {
        into {
            work_root: PathBuf,
        }
        set {
            completed_retention: Duration,
            failed_retention: Duration,
            push_concurrency: usize,
            name_attempts: u32,
            push_policy: PushPolicy,
            private_repos: bool,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
