// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-storage: durable job records keyed by (owner, job)

mod file;
mod memory;
mod store;

pub use file::FileJobStore;
pub use memory::MemoryJobStore;
pub use store::{JobStore, StoreError};

#[cfg(any(test, feature = "test-support"))]
pub use store::FailingJobStore;
