// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project classifier: file tree in, branch plan out.

use crate::buckets::{assign, Bucket};
use crate::conflicts;
use crate::error::ClassifyError;
use crate::tables::{DetectionTable, FRAMEWORKS, LANGUAGES};
use crate::tree::FileTree;
use fl_core::BranchPlan;
use std::collections::{BTreeMap, BTreeSet};

/// Compiled indicator tables. Cheap to share; classification is pure.
#[derive(Debug)]
pub struct Classifier {
    languages: DetectionTable,
    frameworks: DetectionTable,
}

impl Classifier {
    pub fn new() -> Result<Self, ClassifyError> {
        Ok(Self {
            languages: DetectionTable::compile(LANGUAGES)?,
            frameworks: DetectionTable::compile(FRAMEWORKS)?,
        })
    }

    /// Classify a tree. Identical trees always yield identical plans.
    pub fn classify(&self, tree: &FileTree) -> BranchPlan {
        let all: BTreeSet<String> = tree.paths().map(str::to_string).collect();

        let mut buckets: BTreeMap<Bucket, BTreeSet<String>> = BTreeMap::new();
        for path in &all {
            if let Some(bucket) = assign(path) {
                buckets.entry(bucket).or_default().insert(path.clone());
            }
        }
        let ordered = Bucket::ORDER
            .into_iter()
            .filter_map(|b| buckets.remove(&b).map(|files| (b.branch_name().to_string(), files)));

        let plan = BranchPlan::new(all, ordered)
            .with_languages(self.languages.detect(tree))
            .with_frameworks(self.frameworks.detect(tree))
            .with_conflicts(conflicts::detect(tree));

        tracing::debug!(
            files = plan.total_files(),
            branches = ?plan.branch_names(),
            conflicts = plan.conflicts.has_conflicts(),
            "classified project"
        );
        plan
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
