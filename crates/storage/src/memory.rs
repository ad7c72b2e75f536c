// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::store::{JobStore, StoreError};
use async_trait::async_trait;
use fl_core::{Job, JobId, OwnerId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-local job store; clones share the same records
#[derive(Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<RwLock<HashMap<(OwnerId, JobId), Job>>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }

    /// Synchronous read for tests and CLI summaries.
    pub fn snapshot(&self, owner: &OwnerId, job: &JobId) -> Option<Job> {
        self.jobs.read().get(&(owner.clone(), job.clone())).cloned()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn put(&self, job: &Job) -> Result<(), StoreError> {
        self.jobs.write().insert((job.owner_id.clone(), job.id.clone()), job.clone());
        Ok(())
    }

    async fn get(&self, owner: &OwnerId, job: &JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.snapshot(owner, job))
    }

    async fn delete(&self, owner: &OwnerId, job: &JobId) -> Result<bool, StoreError> {
        Ok(self.jobs.write().remove(&(owner.clone(), job.clone())).is_some())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
