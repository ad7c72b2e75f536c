// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level behavior specs: whole jobs driven through the pipeline.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod specs {
    pub mod prelude;

    mod example;
    mod failures;
    mod local;
    mod naming;
    mod progress;
}
