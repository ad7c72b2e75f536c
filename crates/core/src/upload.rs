// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload descriptor and pre-job validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Largest accepted upload (5 GiB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024 * 1024;

const ARCHIVE_EXTENSIONS: &[&str] = &[".tar.gz", ".tgz", ".zip", ".tar", ".rar", ".7z"];

/// Content type for an upload that is already an unpacked directory
pub const DIRECTORY_CONTENT_TYPE: &str = "inode/directory";

const ARCHIVE_CONTENT_TYPES: &[&str] = &[
    DIRECTORY_CONTENT_TYPE,
    "application/zip",
    "application/x-zip-compressed",
    "application/x-tar",
    "application/gzip",
    "application/x-gzip",
    "application/x-rar-compressed",
    "application/vnd.rar",
    "application/x-7z-compressed",
];

/// A raw upload as handed to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    /// Original file name as supplied by the uploader
    pub file_name: String,
    /// Where the raw bytes (or an already unpacked directory) live
    pub location: PathBuf,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, location: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self { file_name: file_name.into(), location: location.into(), size_bytes, content_type: None }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased archive extension, longest match first (`.tar.gz` before `.gz`).
    pub fn archive_extension(&self) -> Option<&'static str> {
        let lower = self.file_name.to_ascii_lowercase();
        ARCHIVE_EXTENSIONS.iter().copied().find(|ext| lower.ends_with(ext))
    }

    /// Reject uploads that can never become a job.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file_name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.size_bytes == 0 {
            return Err(ValidationError::Empty);
        }
        if self.size_bytes > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge { size_bytes: self.size_bytes, limit: MAX_UPLOAD_BYTES });
        }
        let type_ok = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ARCHIVE_CONTENT_TYPES.contains(&ct.to_ascii_lowercase().as_str()));
        if self.archive_extension().is_none() && !type_ok {
            return Err(ValidationError::UnsupportedFormat(self.file_name.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file name is required")]
    MissingName,
    #[error("file is empty")]
    Empty,
    #[error("file is {size_bytes} bytes, limit is {limit}")]
    TooLarge { size_bytes: u64, limit: u64 },
    #[error("unsupported archive format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
