// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch plan and conflict report produced by the classifier.
//!
//! A plan is built once per job and never mutated afterwards. The `main`
//! branch always holds the complete file set; every other branch is a
//! curated subset of it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the branch that always carries the complete file set.
pub const MAIN_BRANCH: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPlan {
    branches: IndexMap<String, BTreeSet<String>>,
    pub detected_languages: BTreeSet<String>,
    pub detected_frameworks: BTreeSet<String>,
    pub conflicts: Conflicts,
}

impl BranchPlan {
    /// Assemble a plan from the full file set and curated buckets.
    ///
    /// Buckets keep their iteration order after `main`. Paths outside the
    /// full set are dropped, empty buckets are skipped, and a bucket named
    /// `main` is ignored since `main` is always the full set.
    pub fn new(
        all_files: BTreeSet<String>,
        buckets: impl IntoIterator<Item = (String, BTreeSet<String>)>,
    ) -> Self {
        let mut branches = IndexMap::new();
        for (name, files) in buckets {
            if name == MAIN_BRANCH {
                continue;
            }
            let files: BTreeSet<String> =
                files.into_iter().filter(|f| all_files.contains(f)).collect();
            if !files.is_empty() {
                branches.entry(name).or_insert_with(BTreeSet::new).extend(files);
            }
        }
        branches.shift_insert(0, MAIN_BRANCH.to_string(), all_files);
        Self {
            branches,
            detected_languages: BTreeSet::new(),
            detected_frameworks: BTreeSet::new(),
            conflicts: Conflicts::default(),
        }
    }

    pub fn with_languages(mut self, languages: BTreeSet<String>) -> Self {
        self.detected_languages = languages;
        self
    }

    pub fn with_frameworks(mut self, frameworks: BTreeSet<String>) -> Self {
        self.detected_frameworks = frameworks;
        self
    }

    pub fn with_conflicts(mut self, conflicts: Conflicts) -> Self {
        self.conflicts = conflicts;
        self
    }

    /// Branches in publish order, `main` first.
    pub fn branches(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.branches.iter().map(|(name, files)| (name.as_str(), files))
    }

    pub fn branch_files(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.branches.get(name)
    }

    pub fn main_files(&self) -> &BTreeSet<String> {
        // `new` always inserts main; deserialized plans may lack it
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.branches.get(MAIN_BRANCH).unwrap_or(&EMPTY)
    }

    /// Suggested branch names, `main` first.
    pub fn branch_names(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }

    pub fn total_files(&self) -> usize {
        self.main_files().len()
    }
}

/// Conflicts found in the extracted tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflicts {
    pub duplicates: Vec<DuplicateGroup>,
    pub oversized: Vec<OversizedFile>,
    pub secret_bearing: Vec<String>,
    pub case_collisions: Vec<CaseCollision>,
}

impl Conflicts {
    pub const SECRET_SUGGESTION: &'static str =
        "Remove credentials or move them to environment variables before publishing";

    pub fn has_conflicts(&self) -> bool {
        !self.duplicates.is_empty()
            || !self.oversized.is_empty()
            || !self.secret_bearing.is_empty()
            || !self.case_collisions.is_empty()
    }
}

/// Files sharing a basename in different directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub file_name: String,
    pub paths: Vec<String>,
    pub same_content: bool,
    pub resolution: DuplicateResolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum DuplicateResolution {
    /// Identical copies: keep `recommended`, drop the rest.
    KeepOne { recommended: String },
    /// Diverging copies: rename each to the matching entry of `renamed`.
    Rename { renamed: Vec<String> },
}

/// File above the repository size threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OversizedFile {
    pub path: String,
    pub size_bytes: u64,
    pub display_size: String,
    pub suggestion: String,
}

impl OversizedFile {
    pub const SUGGESTION: &'static str = "Add to .gitignore or consider using Git LFS";
}

/// Basenames equal under case-folding but distinct in exact case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseCollision {
    pub names: Vec<String>,
    pub paths: Vec<String>,
    pub suggestion: String,
}

impl CaseCollision {
    pub const SUGGESTION: &'static str =
        "Standardize filename casing to avoid conflicts on case-sensitive systems";
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
