// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-adapters: bindings for the pipeline's external collaborators

pub mod extract;
pub mod git;
pub mod safety;
pub mod subprocess;
pub mod vcs;

pub use extract::{CommandExtractor, DirectoryExtractor, ExtractError, Extractor};
pub use safety::{ExtensionSafetyGate, SafetyGate};
pub use vcs::{
    CreateRepository, GitHubVcs, LocalVcs, PushPolicy, PushedCommit, RemoteRepository, RemoteVcs,
    VcsError,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use extract::FakeExtractor;
#[cfg(any(test, feature = "test-support"))]
pub use safety::FakeSafetyGate;
#[cfg(any(test, feature = "test-support"))]
pub use vcs::{FakeVcs, PushCall};
