// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cheap pre-extraction checks on the raw upload.

use async_trait::async_trait;
use fl_core::upload::MAX_UPLOAD_BYTES;
use fl_core::Upload;

#[async_trait]
pub trait SafetyGate: Send + Sync {
    /// `true` when the upload may proceed to extraction.
    async fn quick_scan(&self, upload: &Upload) -> bool;
}

const DANGEROUS_EXTENSIONS: &[&str] = &[
    ".exe", ".bat", ".cmd", ".com", ".scr", ".pif", ".vbs", ".app", ".deb", ".pkg", ".dmg",
    ".iso", ".msi", ".dll", ".so", ".dylib",
];

const DANGEROUS_CONTENT_TYPES: &[&str] = &[
    "application/x-msdownload",
    "application/x-msdos-program",
    "application/x-executable",
    "application/x-sharedlib",
    "application/x-apple-diskimage",
    "application/x-ms-installer",
];

/// Rejects executables and disk images by name or content type, and oversize uploads.
#[derive(Debug, Clone)]
pub struct ExtensionSafetyGate {
    max_bytes: u64,
}

impl Default for ExtensionSafetyGate {
    fn default() -> Self {
        Self { max_bytes: MAX_UPLOAD_BYTES }
    }
}

impl ExtensionSafetyGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn verdict(&self, upload: &Upload) -> Result<(), &'static str> {
        let name = upload.file_name.to_ascii_lowercase();
        if DANGEROUS_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            return Err("dangerous extension");
        }
        if upload.size_bytes > self.max_bytes {
            return Err("too large");
        }
        let content_type = upload.content_type.as_deref().map(str::to_ascii_lowercase);
        if content_type.is_some_and(|ct| DANGEROUS_CONTENT_TYPES.contains(&ct.as_str())) {
            return Err("dangerous content type");
        }
        Ok(())
    }
}

#[async_trait]
impl SafetyGate for ExtensionSafetyGate {
    async fn quick_scan(&self, upload: &Upload) -> bool {
        match self.verdict(upload) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(file = %upload.file_name, reason, "upload rejected by safety gate");
                false
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::SafetyGate;
    use async_trait::async_trait;
    use fl_core::Upload;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeSafetyState {
        accept: bool,
        scanned: Vec<String>,
    }

    /// Fixed verdict; records scanned file names
    #[derive(Clone)]
    pub struct FakeSafetyGate {
        inner: Arc<Mutex<FakeSafetyState>>,
    }

    impl FakeSafetyGate {
        pub fn accepting() -> Self {
            Self { inner: Arc::new(Mutex::new(FakeSafetyState { accept: true, scanned: Vec::new() })) }
        }

        pub fn rejecting() -> Self {
            Self { inner: Arc::new(Mutex::new(FakeSafetyState { accept: false, scanned: Vec::new() })) }
        }

        pub fn scanned(&self) -> Vec<String> {
            self.inner.lock().scanned.clone()
        }
    }

    #[async_trait]
    impl SafetyGate for FakeSafetyGate {
        async fn quick_scan(&self, upload: &Upload) -> bool {
            let mut state = self.inner.lock();
            state.scanned.push(upload.file_name.clone());
            state.accept
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSafetyGate;

#[cfg(test)]
#[path = "safety_tests.rs"]
mod tests;
