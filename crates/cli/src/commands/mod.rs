// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod classify;
pub mod name;
pub mod run;
pub mod status;

use fl_storage::FileJobStore;
use std::path::Path;

/// Owner recorded on jobs started from this machine
pub const DEFAULT_OWNER: &str = "usr-local";

/// Job records live under `<state>/jobs`, shared by `run` and `status`.
pub(crate) fn job_store(state_dir: &Path) -> FileJobStore {
    FileJobStore::new(state_dir.join("jobs"))
}
