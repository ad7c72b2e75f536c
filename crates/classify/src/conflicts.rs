// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conflict detection over a scanned tree.

use crate::secrets::is_secret_bearing;
use crate::tree::{file_name, FileTree};
use fl_core::{
    format_size, CaseCollision, Conflicts, DuplicateGroup, DuplicateResolution, OversizedFile,
};
use std::collections::{BTreeMap, BTreeSet};

/// Files above this size are flagged for `.gitignore` or LFS
pub const OVERSIZED_BYTES: u64 = 100 * 1024 * 1024;

/// Directory names treated as conventional source roots when picking a keeper
const SOURCE_ROOTS: &[&str] = &["lib", "app", "src"];

pub fn detect(tree: &FileTree) -> Conflicts {
    Conflicts {
        duplicates: duplicates(tree),
        oversized: oversized(tree),
        secret_bearing: tree.iter().filter(|e| is_secret_bearing(e)).map(|e| e.path.clone()).collect(),
        case_collisions: case_collisions(tree),
    }
}

fn duplicates(tree: &FileTree) -> Vec<DuplicateGroup> {
    let mut by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entry in tree.iter() {
        by_name.entry(entry.file_name()).or_default().push(&entry.path);
    }

    by_name
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| {
            // Members above the hash ceiling carry no fingerprint and are
            // judged on the ones that do
            let fingerprints: BTreeSet<&str> = paths
                .iter()
                .filter_map(|p| tree.get(p).and_then(|e| e.fingerprint.as_deref()))
                .collect();
            let same_content = fingerprints.len() <= 1;
            let resolution = if same_content {
                DuplicateResolution::KeepOne { recommended: preferred_path(&paths).to_string() }
            } else {
                DuplicateResolution::Rename { renamed: renamed_paths(&paths) }
            };
            DuplicateGroup {
                file_name: name.to_string(),
                paths: paths.iter().map(|p| p.to_string()).collect(),
                same_content,
                resolution,
            }
        })
        .collect()
}

/// First path under a conventional source root, else the shortest.
fn preferred_path<'a>(paths: &[&'a str]) -> &'a str {
    let under_root = |path: &&str| {
        path.contains("src/main/")
            || path.split('/').rev().skip(1).any(|dir| SOURCE_ROOTS.contains(&dir))
    };
    paths
        .iter()
        .copied()
        .find(under_root)
        .or_else(|| paths.iter().copied().min_by_key(|p| (p.len(), *p)))
        .unwrap_or_default()
}

/// `dir/name.ext` becomes `dir/name_1.ext`, `dir/name_2.ext`, ...
fn renamed_paths(paths: &[&str]) -> Vec<String> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let name = file_name(path);
            let dir = &path[..path.len() - name.len()];
            let renamed = match name.rfind('.') {
                Some(dot) if dot > 0 => format!("{}_{}{}", &name[..dot], i + 1, &name[dot..]),
                _ => format!("{name}_{}", i + 1),
            };
            format!("{dir}{renamed}")
        })
        .collect()
}

fn oversized(tree: &FileTree) -> Vec<OversizedFile> {
    tree.iter()
        .filter(|e| e.size_bytes > OVERSIZED_BYTES)
        .map(|e| OversizedFile {
            path: e.path.clone(),
            size_bytes: e.size_bytes,
            display_size: format_size(e.size_bytes),
            suggestion: OversizedFile::SUGGESTION.to_string(),
        })
        .collect()
}

fn case_collisions(tree: &FileTree) -> Vec<CaseCollision> {
    let mut by_folded: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for entry in tree.iter() {
        by_folded.entry(entry.file_name().to_lowercase()).or_default().push(&entry.path);
    }

    by_folded
        .into_values()
        .filter_map(|paths| {
            let names: BTreeSet<&str> = paths.iter().map(|p| file_name(p)).collect();
            (names.len() > 1).then(|| CaseCollision {
                names: names.into_iter().map(str::to_string).collect(),
                paths: paths.iter().map(|p| p.to_string()).collect(),
                suggestion: CaseCollision::SUGGESTION.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "conflicts_tests.rs"]
mod tests;
