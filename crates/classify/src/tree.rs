// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory view of an extracted project tree.
//!
//! The classifier never touches the filesystem itself; everything it needs
//! (sizes, content fingerprints, text of candidate files) is captured here
//! once, either by [`FileTree::scan`] or by the in-memory builder.

use crate::error::ClassifyError;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files above this size are not fingerprinted
pub const HASH_CEILING_BYTES: u64 = 10 * 1024 * 1024;

/// Files above this size are not read as text
pub const TEXT_CEILING_BYTES: u64 = 1024 * 1024;

/// Names dropped while scanning, at any depth
pub const SYSTEM_NAMES: &[&str] =
    &["__MACOSX", ".DS_Store", "Thumbs.db", "desktop.ini", ".git", ".svn", ".hg", ".idea"];

/// Extensions whose contents are kept for secret and manifest inspection
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "xml", "yaml", "yml", "properties", "conf", "cfg", "ini", "toml", "env",
    "js", "jsx", "ts", "tsx", "py", "java", "kt", "cpp", "c", "h", "cs", "php", "rb", "go", "rs",
    "sh", "gradle", "sql",
];

/// Extensionless names whose contents are kept
const TEXT_NAMES: &[&str] = &["Gemfile", "Dockerfile", "Makefile", "artisan"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the tree root, `/`-separated
    pub path: String,
    pub size_bytes: u64,
    /// Hex sha256 of the contents; absent above [`HASH_CEILING_BYTES`]
    pub fingerprint: Option<String>,
    /// UTF-8 contents of text candidates up to [`TEXT_CEILING_BYTES`]
    pub text: Option<String>,
}

impl FileEntry {
    pub fn from_bytes(path: impl Into<String>, bytes: &[u8]) -> Self {
        let path = path.into();
        let size_bytes = bytes.len() as u64;
        let fingerprint =
            (size_bytes <= HASH_CEILING_BYTES).then(|| format!("{:x}", Sha256::digest(bytes)));
        let text = (size_bytes <= TEXT_CEILING_BYTES && is_text_candidate(&path))
            .then(|| std::str::from_utf8(bytes).ok().map(str::to_string))
            .flatten();
        Self { path, size_bytes, fingerprint, text }
    }

    /// An entry known only by its size (too large to read).
    pub fn sized(path: impl Into<String>, size_bytes: u64) -> Self {
        Self { path: path.into(), size_bytes, fingerprint: None, text: None }
    }

    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub(crate) fn extension(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    // `.env` is an extension for our purposes; `.gitignore` alone is not
    if stem.is_empty() && ext != "env" {
        return None;
    }
    Some(ext)
}

fn is_text_candidate(path: &str) -> bool {
    let name = file_name(path);
    if TEXT_NAMES.contains(&name) || name.starts_with(".env") {
        return true;
    }
    extension(name).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_system_name(name: &str) -> bool {
    SYSTEM_NAMES.contains(&name) || name.starts_with("._")
}

/// Files of a project keyed by relative path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    entries: BTreeMap<String, FileEntry>,
}

impl FileTree {
    /// Walk `root`, skipping system files and symlinks.
    pub fn scan(root: &Path) -> Result<Self, ClassifyError> {
        if !root.is_dir() {
            return Err(ClassifyError::NotADirectory(root.to_path_buf()));
        }
        let mut tree = FileTree::default();
        let mut pending = vec![PathBuf::new()];
        while let Some(rel_dir) = pending.pop() {
            let dir = root.join(&rel_dir);
            let read = std::fs::read_dir(&dir).map_err(|source| io_err(&dir, source))?;
            for entry in read {
                let entry = entry.map_err(|source| io_err(&dir, source))?;
                let name = entry.file_name().to_string_lossy().into_owned();
                if is_system_name(&name) {
                    continue;
                }
                let file_type = entry.file_type().map_err(|source| io_err(&entry.path(), source))?;
                let rel = rel_dir.join(&name);
                if file_type.is_dir() {
                    pending.push(rel);
                } else if file_type.is_file() {
                    let file_entry = read_entry(&entry.path(), relative_key(&rel))?;
                    tree.insert(file_entry);
                }
            }
        }
        tracing::debug!(root = %root.display(), files = tree.len(), "scanned project tree");
        Ok(tree)
    }

    pub fn builder() -> FileTreeBuilder {
        FileTreeBuilder::default()
    }

    pub fn insert(&mut self, entry: FileEntry) {
        self.entries.insert(entry.path.clone(), entry);
    }

    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.get(path)
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn io_err(path: &Path, source: std::io::Error) -> ClassifyError {
    ClassifyError::Io { path: path.to_path_buf(), source }
}

fn relative_key(rel: &Path) -> String {
    rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

fn read_entry(path: &Path, key: String) -> Result<FileEntry, ClassifyError> {
    let size = std::fs::metadata(path).map_err(|source| io_err(path, source))?.len();
    if size > HASH_CEILING_BYTES {
        return Ok(FileEntry::sized(key, size));
    }
    let bytes = std::fs::read(path).map_err(|source| io_err(path, source))?;
    Ok(FileEntry::from_bytes(key, &bytes))
}

/// Builds trees in memory for tests and callers that already hold contents
#[derive(Debug, Default)]
pub struct FileTreeBuilder {
    tree: FileTree,
}

impl FileTreeBuilder {
    pub fn file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.tree.insert(FileEntry::from_bytes(path, contents.as_ref()));
        self
    }

    /// A file known only by size, as scanned files above the hash ceiling are.
    pub fn sized(mut self, path: &str, size_bytes: u64) -> Self {
        self.tree.insert(FileEntry::sized(path, size_bytes));
        self
    }

    pub fn build(self) -> FileTree {
        self.tree
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
