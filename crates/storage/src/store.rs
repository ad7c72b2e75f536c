// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use fl_core::{Job, JobId, OwnerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable record of job stage and result.
///
/// Implementations must tolerate concurrent calls from many job tasks.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert or replace the record for `(job.owner_id, job.id)`.
    async fn put(&self, job: &Job) -> Result<(), StoreError>;

    async fn get(&self, owner: &OwnerId, job: &JobId) -> Result<Option<Job>, StoreError>;

    /// Remove a record; returns whether one existed.
    async fn delete(&self, owner: &OwnerId, job: &JobId) -> Result<bool, StoreError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{JobStore, StoreError};
    use crate::MemoryJobStore;
    use async_trait::async_trait;
    use fl_core::{Job, JobId, OwnerId, Stage};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FailingState {
        fail_on: Option<Stage>,
        fail_all: bool,
    }

    /// In-memory store that can be told to fail writes
    #[derive(Clone, Default)]
    pub struct FailingJobStore {
        inner: MemoryJobStore,
        state: Arc<Mutex<FailingState>>,
    }

    impl FailingJobStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every call fails.
        pub fn always(self) -> Self {
            self.state.lock().fail_all = true;
            self
        }

        /// Writes of a job at `stage` fail; others succeed.
        pub fn on_stage(self, stage: Stage) -> Self {
            self.state.lock().fail_on = Some(stage);
            self
        }

        /// The successfully stored records
        pub fn records(&self) -> &MemoryJobStore {
            &self.inner
        }

        fn check(&self, stage: Option<Stage>) -> Result<(), StoreError> {
            let state = self.state.lock();
            if state.fail_all || (stage.is_some() && stage == state.fail_on) {
                return Err(StoreError::Unavailable("injected failure".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl JobStore for FailingJobStore {
        async fn put(&self, job: &Job) -> Result<(), StoreError> {
            self.check(Some(job.stage))?;
            self.inner.put(job).await
        }

        async fn get(&self, owner: &OwnerId, job: &JobId) -> Result<Option<Job>, StoreError> {
            self.check(None)?;
            self.inner.get(owner, job).await
        }

        async fn delete(&self, owner: &OwnerId, job: &JobId) -> Result<bool, StoreError> {
            self.check(None)?;
            self.inner.delete(owner, job).await
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FailingJobStore;
