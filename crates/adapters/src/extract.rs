// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction adapters: turn an upload into a directory of project files.

use crate::subprocess::{run_checked, EXTRACT_TIMEOUT};
use async_trait::async_trait;
use fl_core::Upload;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported archive: {0}")]
    Unsupported(String),

    #[error("source not found: {0}")]
    NotFound(PathBuf),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Tool(String),
}

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Unpack `upload` under `dest` and return the project root.
    async fn extract(&self, upload: &Upload, dest: &Path) -> Result<PathBuf, ExtractError>;
}

/// Unpacks archives by shelling out to `unzip`, `tar`, `unrar`, or `7z`.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    timeout: Duration,
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self { timeout: EXTRACT_TIMEOUT }
    }
}

impl CommandExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(ext: &str, archive: &Path, dest: &Path) -> Option<Command> {
        let mut cmd;
        match ext {
            ".zip" => {
                cmd = Command::new("unzip");
                cmd.args(["-q", "-o"]).arg(archive).arg("-d").arg(dest);
            }
            ".tar" => {
                cmd = Command::new("tar");
                cmd.arg("-xf").arg(archive).arg("-C").arg(dest);
            }
            ".tar.gz" | ".tgz" => {
                cmd = Command::new("tar");
                cmd.arg("-xzf").arg(archive).arg("-C").arg(dest);
            }
            ".rar" => {
                cmd = Command::new("unrar");
                cmd.args(["x", "-o+", "-idq"]).arg(archive).arg(dest);
            }
            ".7z" => {
                cmd = Command::new("7z");
                cmd.args(["x", "-y"]).arg(format!("-o{}", dest.display())).arg(archive);
            }
            _ => return None,
        }
        Some(cmd)
    }
}

#[async_trait]
impl Extractor for CommandExtractor {
    async fn extract(&self, upload: &Upload, dest: &Path) -> Result<PathBuf, ExtractError> {
        if !upload.location.is_file() {
            return Err(ExtractError::NotFound(upload.location.clone()));
        }
        let ext = upload
            .archive_extension()
            .ok_or_else(|| ExtractError::Unsupported(upload.file_name.clone()))?;
        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| ExtractError::Io(format!("failed to create {}: {e}", dest.display())))?;

        let cmd = Self::command(ext, &upload.location, dest)
            .ok_or_else(|| ExtractError::Unsupported(upload.file_name.clone()))?;
        run_checked(cmd, self.timeout, "extract").await.map_err(ExtractError::Tool)?;

        let root = project_root(dest).await?;
        tracing::info!(archive = %upload.file_name, root = %root.display(), "extracted upload");
        Ok(root)
    }
}

/// An archive wrapping everything in one top-level folder is rooted at that folder.
async fn project_root(dest: &Path) -> Result<PathBuf, ExtractError> {
    let io = |e: std::io::Error| ExtractError::Io(format!("failed to read {}: {e}", dest.display()));
    let mut entries = tokio::fs::read_dir(dest).await.map_err(io)?;
    let mut visible = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == "__MACOSX" || name == ".DS_Store" {
            continue;
        }
        visible.push(entry);
    }
    if let [only] = visible.as_slice() {
        if only.file_type().await.map_err(io)?.is_dir() {
            return Ok(only.path());
        }
    }
    Ok(dest.to_path_buf())
}

/// Treats the upload location as an already unpacked project directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryExtractor;

#[async_trait]
impl Extractor for DirectoryExtractor {
    async fn extract(&self, upload: &Upload, _dest: &Path) -> Result<PathBuf, ExtractError> {
        if upload.location.is_dir() {
            Ok(upload.location.clone())
        } else {
            Err(ExtractError::NotFound(upload.location.clone()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ExtractError, Extractor};
    use async_trait::async_trait;
    use fl_core::Upload;
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeExtractorState {
        files: Vec<(String, Vec<u8>)>,
        error: Option<String>,
        calls: Vec<PathBuf>,
    }

    /// Writes a fixed set of files into the destination directory
    #[derive(Clone, Default)]
    pub struct FakeExtractor {
        inner: Arc<Mutex<FakeExtractorState>>,
    }

    impl FakeExtractor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: &str, contents: impl AsRef<[u8]>) -> Self {
            self.inner.lock().files.push((path.to_string(), contents.as_ref().to_vec()));
            self
        }

        pub fn failing(self, message: &str) -> Self {
            self.inner.lock().error = Some(message.to_string());
            self
        }

        /// Destinations passed to `extract`
        pub fn calls(&self) -> Vec<PathBuf> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl Extractor for FakeExtractor {
        async fn extract(&self, _upload: &Upload, dest: &Path) -> Result<PathBuf, ExtractError> {
            let (files, error) = {
                let mut state = self.inner.lock();
                state.calls.push(dest.to_path_buf());
                (state.files.clone(), state.error.clone())
            };
            if let Some(message) = error {
                return Err(ExtractError::Tool(message));
            }
            for (rel, contents) in files {
                let path = dest.join(rel);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| ExtractError::Io(e.to_string()))?;
                }
                tokio::fs::write(&path, contents).await.map_err(|e| ExtractError::Io(e.to_string()))?;
            }
            tokio::fs::create_dir_all(dest).await.map_err(|e| ExtractError::Io(e.to_string()))?;
            Ok(dest.to_path_buf())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeExtractor;

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
