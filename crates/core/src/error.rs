// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-level error taxonomy.
//!
//! Every stage failure is converted into one of these at the pipeline
//! boundary and recorded on the failed job. Branch push failures are not
//! job failures; they travel as [`BranchPushError`] inside the outcome.

use crate::stage::TransitionError;
use crate::upload::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid upload: {0}")]
    Validation(#[from] ValidationError),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("upload rejected by safety scan")]
    UnsafeUpload,

    #[error("could not classify project: {0}")]
    Classification(String),

    #[error("could not prepare working copies: {0}")]
    Workspace(String),

    #[error("repository creation failed: {0}")]
    Repository(String),

    #[error("no free repository name after {attempts} attempts (last tried {last_name})")]
    RepositoryNameExhausted { attempts: u32, last_name: String },

    #[error("job store unavailable: {0}")]
    Persistence(String),

    #[error("job cancelled")]
    Cancelled,

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Stable, serializable tag for a [`PipelineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    Extraction,
    UnsafeUpload,
    Classification,
    Workspace,
    Repository,
    RepositoryNameExhausted,
    Persistence,
    Cancelled,
    Internal,
}

crate::simple_display! {
    ErrorKind {
        Validation => "validation",
        Extraction => "extraction",
        UnsafeUpload => "unsafeUpload",
        Classification => "classification",
        Workspace => "workspace",
        Repository => "repository",
        RepositoryNameExhausted => "repositoryNameExhausted",
        Persistence => "persistence",
        Cancelled => "cancelled",
        Internal => "internal",
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(_) => ErrorKind::Validation,
            PipelineError::Extraction(_) => ErrorKind::Extraction,
            PipelineError::UnsafeUpload => ErrorKind::UnsafeUpload,
            PipelineError::Classification(_) => ErrorKind::Classification,
            PipelineError::Workspace(_) => ErrorKind::Workspace,
            PipelineError::Repository(_) => ErrorKind::Repository,
            PipelineError::RepositoryNameExhausted { .. } => ErrorKind::RepositoryNameExhausted,
            PipelineError::Persistence(_) => ErrorKind::Persistence,
            PipelineError::Cancelled => ErrorKind::Cancelled,
            PipelineError::Transition(_) => ErrorKind::Internal,
        }
    }
}

/// Non-fatal failure of one branch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("branch {branch}: {reason}")]
pub struct BranchPushError {
    pub branch: String,
    pub reason: String,
}

impl BranchPushError {
    pub fn new(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { branch: branch.into(), reason: reason.into() }
    }

    pub fn cancelled(branch: impl Into<String>) -> Self {
        Self::new(branch, "cancelled")
    }
}
