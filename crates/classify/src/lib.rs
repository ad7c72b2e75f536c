// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-classify: deterministic project classification and branch planning

mod buckets;
mod classifier;
mod conflicts;
mod error;
mod secrets;
mod tables;
mod tree;

pub use buckets::{assign, Bucket};
pub use classifier::Classifier;
pub use conflicts::OVERSIZED_BYTES;
pub use error::ClassifyError;
pub use secrets::is_secret_bearing;
pub use tables::{DetectionTable, Indicator, ManifestRule, FRAMEWORKS, LANGUAGES};
pub use tree::{FileEntry, FileTree, FileTreeBuilder, HASH_CEILING_BYTES, SYSTEM_NAMES};
