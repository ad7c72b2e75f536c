// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential-like content detection.

use crate::tree::{extension, FileEntry};
use regex::RegexSet;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static SECRET_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r#"(?i)(api[_-]?key|apikey)['"]?\s*[=:]\s*['"]?[a-zA-Z0-9_\-]{20,}"#,
        r#"(?i)(secret[_-]?key|secretkey)['"]?\s*[=:]\s*['"]?[a-zA-Z0-9_\-]{20,}"#,
        r#"(?i)(access[_-]?token|accesstoken)['"]?\s*[=:]\s*['"]?[a-zA-Z0-9_\-]{20,}"#,
        r#"(?i)(password|passwd|pwd)['"]?\s*[=:]\s*['"]?[^\s'"]{8,}"#,
        r#"(?i)(database[_-]?url|db[_-]?url)['"]?\s*[=:]\s*['"]?[^\s'"]+"#,
        r#"(?i)(private[_-]?key|privatekey)['"]?\s*[=:]\s*['"]?[^\s'"]+"#,
        r#"(?i)(aws[_-]?access[_-]?key|aws[_-]?secret)['"]?\s*[=:]\s*['"]?[A-Z0-9]{20}"#,
        r#"(?i)(github[_-]?token|gh[_-]?token)['"]?\s*[=:]\s*['"]?[a-zA-Z0-9_\-]{40}"#,
        r"-----BEGIN (RSA |EC |OPENSSH )?PRIVATE KEY-----",
    ])
    .expect("constant regex pattern is valid")
});

const DOC_MARKERS: &[&str] = &["readme", "license", "licence", "changelog", "authors"];

/// Documentation files are never reported, whatever they contain.
fn is_documentation(entry: &FileEntry) -> bool {
    let name = entry.file_name().to_ascii_lowercase();
    extension(&name).is_some_and(|ext| matches!(ext, "md" | "rst" | "adoc"))
        || DOC_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Whether the entry's text contains a credential-like assignment.
pub fn is_secret_bearing(entry: &FileEntry) -> bool {
    if is_documentation(entry) {
        return false;
    }
    entry.text.as_deref().is_some_and(|text| SECRET_PATTERNS.is_match(text))
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
