// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that map to a specific process exit code.
//!
//! Commands return these through `anyhow` so `main` alone decides when the
//! process ends.

use thiserror::Error;

/// The job ran but ended FAILED
pub const JOB_FAILED: i32 = 2;

/// The requested record does not exist
pub const NOT_FOUND: i32 = 3;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    /// Printed to stderr unless empty
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Failure already reported on stdout; exit without repeating it.
    pub fn silent(code: i32) -> Self {
        Self::new(code, "")
    }
}
