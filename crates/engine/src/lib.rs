// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-engine: progress hub, branch publisher and the pipeline orchestrator

pub mod config;
pub mod env;
mod generated;
pub mod pipeline;
pub mod progress;
pub mod publisher;

pub use config::{ConfigError, PipelineConfig};
pub use pipeline::{JobHandle, Pipeline, PipelineDeps};
pub use progress::{ProgressError, ProgressHub, Retention, Subscription};
pub use publisher::{BranchPublisher, CreatedRepository, WorkingCopy, Workspace};
