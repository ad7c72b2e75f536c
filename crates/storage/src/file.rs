// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-file job store: `<dir>/<owner>/<job>.json`.
//!
//! Records are written to a sibling `.tmp` file and renamed into place so a
//! reader never observes a half-written record.

use crate::store::{JobStore, StoreError};
use async_trait::async_trait;
use fl_core::{Job, JobId, OwnerId};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileJobStore {
    dir: PathBuf,
}

impl FileJobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, owner: &OwnerId, job: &JobId) -> Result<PathBuf, StoreError> {
        check_component(owner.as_str())?;
        check_component(job.as_str())?;
        Ok(self.dir.join(owner.as_str()).join(format!("{}.json", job.as_str())))
    }
}

fn check_component(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[async_trait]
impl JobStore for FileJobStore {
    async fn put(&self, job: &Job) -> Result<(), StoreError> {
        let path = self.record_path(&job.owner_id, &job.id)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(job)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::trace!(job_id = %job.id, stage = %job.stage, "persisted job");
        Ok(())
    }

    async fn get(&self, owner: &OwnerId, job: &JobId) -> Result<Option<Job>, StoreError> {
        let path = self.record_path(owner, job)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, owner: &OwnerId, job: &JobId) -> Result<bool, StoreError> {
        let path = self.record_path(owner, job)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
