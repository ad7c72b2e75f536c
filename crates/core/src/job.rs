// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record: one end-to-end run for a single upload.

use crate::clock::Clock;
use crate::error::{ErrorKind, PipelineError};
use crate::id::{JobId, OwnerId};
use crate::outcome::PublishOutcome;
use crate::plan::BranchPlan;
use crate::stage::{Stage, TransitionError};
use crate::upload::Upload;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a caller submits to start a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub owner_id: OwnerId,
    pub upload: Upload,
    /// Requested repository name; derived from the upload file name if absent
    pub repo_name: Option<String>,
    pub description: Option<String>,
}

impl JobRequest {
    pub fn new(owner_id: impl Into<OwnerId>, upload: Upload) -> Self {
        Self { owner_id: owner_id.into(), upload, repo_name: None, description: None }
    }

    pub fn with_repo_name(mut self, name: impl Into<String>) -> Self {
        self.repo_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A job as persisted to the job store after every stage transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub owner_id: OwnerId,
    /// Location of the raw upload
    pub source_ref: PathBuf,
    pub source_name: String,
    pub stage: Stage,
    pub percent: u8,
    pub started_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<BranchPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PublishOutcome>,
}

impl Job {
    pub fn new(id: JobId, owner_id: OwnerId, upload: &Upload, clock: &impl Clock) -> Self {
        Self {
            id,
            owner_id,
            source_ref: upload.location.clone(),
            source_name: upload.file_name.clone(),
            stage: Stage::Uploaded,
            percent: Stage::Uploaded.entry_percent(),
            started_at_ms: clock.epoch_ms(),
            ended_at_ms: None,
            error_message: None,
            error_kind: None,
            extracted_root: None,
            analysis: None,
            result: None,
        }
    }

    /// Move to `stage`, never lowering the percent.
    pub fn advance(&mut self, stage: Stage, percent: u8) -> Result<(), TransitionError> {
        self.stage.check_transition(stage)?;
        self.stage = stage;
        self.percent = self.percent.max(percent.min(100));
        Ok(())
    }

    /// Enter `stage` at its standard entry percent.
    pub fn enter(&mut self, stage: Stage) -> Result<(), TransitionError> {
        self.advance(stage, stage.entry_percent())
    }

    /// Record a terminal failure. The percent reached so far is kept.
    pub fn fail(&mut self, error: &PipelineError, epoch_ms: u64) -> Result<(), TransitionError> {
        self.stage.check_transition(Stage::Failed)?;
        self.stage = Stage::Failed;
        self.error_message = Some(error.to_string());
        self.error_kind = Some(error.kind());
        self.ended_at_ms = Some(epoch_ms);
        Ok(())
    }

    pub fn complete(&mut self, outcome: PublishOutcome, epoch_ms: u64) -> Result<(), TransitionError> {
        self.enter(Stage::Completed)?;
        self.result = Some(outcome);
        self.ended_at_ms = Some(epoch_ms);
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.ended_at_ms.unwrap_or(now_ms).saturating_sub(self.started_at_ms)
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = "job-test1",
            owner_id: OwnerId = "usr-test1",
            source_ref: PathBuf = "/tmp/upload.zip",
            source_name: String = "upload.zip",
        }
        set {
            stage: Stage = Stage::Uploaded,
            percent: u8 = 0,
            started_at_ms: u64 = 1_000_000,
            ended_at_ms: Option<u64> = None,
            error_message: Option<String> = None,
            error_kind: Option<ErrorKind> = None,
            analysis: Option<BranchPlan> = None,
            result: Option<PublishOutcome> = None,
        }
        option {
            extracted_root: PathBuf = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
