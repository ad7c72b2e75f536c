// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress records shared by the hub and its subscribers.

use crate::id::{JobId, OwnerId};
use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One progress notification fanned out to an owner's subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub job_id: JobId,
    pub owner_id: OwnerId,
    pub stage: Stage,
    pub percent: u8,
    pub message: String,
    /// Stage-specific structured details
    #[serde(default)]
    pub payload: Value,
    pub has_error: bool,
    pub completed: bool,
    pub timestamp_ms: u64,
}

impl ProgressEvent {
    pub fn is_terminal(&self) -> bool {
        self.completed || self.has_error
    }
}

/// Last known state of a job, retained for pollers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSession {
    pub job_id: JobId,
    pub owner_id: OwnerId,
    pub stage: Stage,
    pub percent: u8,
    pub message: String,
    #[serde(default)]
    pub payload: Value,
    pub completed: bool,
    pub has_error: bool,
    pub last_update_ms: u64,
}

impl ProgressSession {
    pub fn new(job_id: JobId, owner_id: OwnerId, now_ms: u64) -> Self {
        Self {
            job_id,
            owner_id,
            stage: Stage::Uploaded,
            percent: 0,
            message: Stage::Uploaded.status_message().to_string(),
            payload: Value::Null,
            completed: false,
            has_error: false,
            last_update_ms: now_ms,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.completed || self.has_error
    }

    /// The event describing this session's current state.
    pub fn to_event(&self) -> ProgressEvent {
        ProgressEvent {
            job_id: self.job_id.clone(),
            owner_id: self.owner_id.clone(),
            stage: self.stage,
            percent: self.percent,
            message: self.message.clone(),
            payload: self.payload.clone(),
            has_error: self.has_error,
            completed: self.completed,
            timestamp_ms: self.last_update_ms,
        }
    }
}
