// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with timeouts.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default budget for a single git invocation
pub const GIT_TIMEOUT: Duration = Duration::from_secs(120);

/// Budget for unpacking an archive
pub const EXTRACT_TIMEOUT: Duration = Duration::from_secs(600);

/// Run `cmd` to completion, killing it if `timeout` elapses first.
///
/// A non-zero exit is not an error here; callers inspect `status`.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(format!("{label} failed to start: {e}")),
        Err(_) => Err(format!("{label} timed out after {}s", timeout.as_secs())),
    }
}

/// Like [`run_with_timeout`], but a non-zero exit becomes an error carrying stderr.
pub async fn run_checked(cmd: Command, timeout: Duration, label: &str) -> Result<Output, String> {
    let output = run_with_timeout(cmd, timeout, label).await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{label} failed: {}", stderr.trim()));
    }
    Ok(output)
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
