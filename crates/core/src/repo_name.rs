// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository names derived from upload file names.

use regex::Regex;
use std::sync::LazyLock;

/// Longest name we will ask the remote for
pub const MAX_REPO_NAME_LEN: usize = 80;

const FALLBACK_NAME: &str = "project";

#[allow(clippy::expect_used)]
static PARENTHESISED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static COPY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*[-_]\s*copy\s*$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9._-]").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("constant regex pattern is valid"));

const STRIP_EXTENSIONS: &[&str] = &[".tar.gz", ".tgz", ".zip", ".tar", ".rar", ".7z", ".gz"];

/// Derive a remote-safe repository name from an upload's file name.
///
/// `My Project (1) - Copy.zip` becomes `my-project`.
pub fn derive_repo_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let lower = base.to_ascii_lowercase();
    let stem = STRIP_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map_or(base, |ext| &base[..base.len() - ext.len()]);

    let name = PARENTHESISED.replace_all(stem, "");
    let name = COPY_MARKER.replace_all(&name, "");
    let name = name.trim().to_lowercase();
    let name = WHITESPACE.replace_all(&name, "-");
    let name = INVALID.replace_all(&name, "-");
    let name = HYPHEN_RUN.replace_all(&name, "-");
    let mut name = name.trim_matches('-').to_string();

    if name.len() > MAX_REPO_NAME_LEN {
        name.truncate(MAX_REPO_NAME_LEN);
        name = name.trim_end_matches('-').to_string();
    }
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Characters of a job's tag kept in its retry names
const RETRY_TAG_LEN: usize = 6;

/// Short lowercase tag for a job's retry names, taken from `seed`.
///
/// Non-alphanumeric characters are dropped, so any ID suffix yields a
/// remote-safe tag.
pub fn retry_tag(seed: &str) -> String {
    seed.chars().filter(char::is_ascii_alphanumeric).take(RETRY_TAG_LEN).map(|c| c.to_ascii_lowercase()).collect()
}

/// Name for retry `attempt` (1-based) after a name conflict.
///
/// The attempt number keeps one job's names distinct within a clock second;
/// `tag` keeps concurrent jobs with the same base name apart.
pub fn retry_name(base: &str, epoch_secs: u64, tag: &str, attempt: u32) -> String {
    let suffix = if tag.is_empty() {
        format!("-{epoch_secs}-{attempt}")
    } else {
        format!("-{epoch_secs}-{tag}-{attempt}")
    };
    let keep = MAX_REPO_NAME_LEN.saturating_sub(suffix.len()).min(base.len());
    format!("{}{suffix}", base[..keep].trim_end_matches('-'))
}

#[cfg(test)]
#[path = "repo_name_tests.rs"]
mod tests;
