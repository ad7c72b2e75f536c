// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-core: shared records and state machine for the forklift pipeline

pub mod macros;

pub mod clock;
pub mod error;
pub mod id;
pub mod job;
pub mod outcome;
pub mod plan;
pub mod progress;
pub mod repo_name;
pub mod size_fmt;
pub mod stage;
pub mod upload;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{BranchPushError, ErrorKind, PipelineError};
pub use id::{JobId, OwnerId};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobRequest};
pub use outcome::{BranchPublishResult, PublishOutcome};
pub use plan::{
    BranchPlan, CaseCollision, Conflicts, DuplicateGroup, DuplicateResolution, OversizedFile,
    MAIN_BRANCH,
};
pub use progress::{ProgressEvent, ProgressSession};
pub use repo_name::{derive_repo_name, retry_name, retry_tag};
pub use size_fmt::format_size;
pub use stage::{Stage, TransitionError};
pub use upload::{Upload, ValidationError};
