// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BranchPublishResult, JobRequest, PublishOutcome, Upload};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::stage::Stage;
    use proptest::prelude::*;

    pub fn arb_stage() -> impl Strategy<Value = Stage> {
        prop_oneof![
            Just(Stage::Uploaded),
            Just(Stage::Extracting),
            Just(Stage::Scanning),
            Just(Stage::Analyzing),
            Just(Stage::Organizing),
            Just(Stage::CreatingRepo),
            Just(Stage::Publishing),
            Just(Stage::Completed),
            Just(Stage::Failed),
        ]
    }

    /// Random walks of attempted transitions starting from `Uploaded`.
    pub fn arb_transitions() -> impl Strategy<Value = Vec<(Stage, u8)>> {
        proptest::collection::vec((arb_stage(), 0u8..=100), 0..24)
    }
}

// ── Record factories ────────────────────────────────────────────────────

pub fn zip_request(owner: &str, file_name: &str) -> JobRequest {
    JobRequest::new(owner, Upload::new(file_name, format!("/tmp/{file_name}"), 2048))
}

pub fn pushed(branch: &str) -> BranchPublishResult {
    BranchPublishResult::pushed(branch, format!("/tmp/work/{branch}"), format!("c0ffee-{branch}"))
}

pub fn outcome(name: &str, results: Vec<BranchPublishResult>) -> PublishOutcome {
    PublishOutcome {
        repository_url: format!("https://vcs.test/{name}"),
        clone_url: format!("https://vcs.test/{name}.git"),
        attempted_name: name.to_string(),
        name_retry_count: 0,
        branch_results: results,
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
