// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `forklift run`: push an archive or project directory through the pipeline.

use super::{job_store, DEFAULT_OWNER};
use crate::exit_error::{ExitError, JOB_FAILED};
use crate::output::{self, OutputFormat};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use fl_adapters::{
    CommandExtractor, DirectoryExtractor, ExtensionSafetyGate, Extractor, GitHubVcs, LocalVcs, RemoteVcs,
};
use fl_core::upload::DIRECTORY_CONTENT_TYPE;
use fl_core::{JobRequest, Stage, SystemClock, Upload};
use fl_engine::{env, Pipeline, PipelineConfig, PipelineDeps};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct RunArgs {
    /// Archive (.zip, .tar.gz, .rar, .7z, ...) or unpacked project directory
    pub source: PathBuf,

    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repository name to try first (derived from the source name otherwise)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Publish to GitHub using FORKLIFT_GITHUB_TOKEN instead of local bare repositories
    #[arg(long)]
    pub github: bool,
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let upload = upload_for(&args.source)?;
    let state_dir = env::state_dir()?;
    let extractor: Arc<dyn Extractor> = if upload.location.is_dir() {
        Arc::new(DirectoryExtractor)
    } else {
        Arc::new(CommandExtractor::new())
    };

    let mut request = JobRequest::new(args.owner.as_str(), upload);
    if let Some(name) = args.name {
        request = request.with_repo_name(name);
    }
    if let Some(description) = args.description {
        request = request.with_description(description);
    }

    if args.github {
        let token = env::github_token().ok_or_else(|| anyhow!("--github needs FORKLIFT_GITHUB_TOKEN"))?;
        let vcs = GitHubVcs::new(token).with_git_timeout(env::git_timeout());
        execute(vcs, extractor, &state_dir, request, format).await
    } else {
        let remotes = state_dir.join("remotes");
        output::note(&format!("remotes: {}", remotes.display()), format);
        let vcs = LocalVcs::new(remotes).with_git_timeout(env::git_timeout());
        execute(vcs, extractor, &state_dir, request, format).await
    }
}

async fn execute<V: RemoteVcs>(
    vcs: V,
    extractor: Arc<dyn Extractor>,
    state_dir: &Path,
    request: JobRequest,
    format: OutputFormat,
) -> Result<()> {
    let deps = PipelineDeps {
        vcs,
        store: Arc::new(job_store(state_dir)),
        extractor,
        gate: Arc::new(ExtensionSafetyGate::new()),
    };
    let pipeline = Pipeline::new(deps, PipelineConfig::from_env(), SystemClock)?;

    // Subscribe first so the UPLOADED event is not missed.
    let mut events = pipeline.subscribe(&request.owner_id);
    let handle = pipeline.start(request).await?;
    let job_id = handle.job_id().clone();
    let cancel = handle.cancel_token();
    let mut finished = std::pin::pin!(handle.wait());
    let mut interrupted = false;

    let job = loop {
        tokio::select! {
            Some(event) = events.recv() => {
                if event.job_id == job_id {
                    output::print_event(&event, format)?;
                }
            }
            joined = &mut finished => break joined.context("job task panicked")?,
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                tracing::warn!(job_id = %job_id, "interrupted, cancelling job");
                cancel.cancel();
            }
        }
    };
    while let Some(event) = events.try_recv() {
        if event.job_id == job_id {
            output::print_event(&event, format)?;
        }
    }

    output::print_job(&job, format)?;
    if job.stage == Stage::Failed {
        return Err(ExitError::silent(JOB_FAILED).into());
    }
    Ok(())
}

/// Describe `source` as an upload; directories are accepted as already unpacked.
fn upload_for(source: &Path) -> Result<Upload> {
    let location = source.canonicalize().with_context(|| format!("cannot read {}", source.display()))?;
    let file_name = location
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} has no file name", location.display()))?;

    if location.is_dir() {
        let size = dir_size(&location)?;
        return Ok(Upload::new(file_name, location, size).with_content_type(DIRECTORY_CONTENT_TYPE));
    }
    let size = std::fs::metadata(&location)?.len();
    Ok(Upload::new(file_name, location, size))
}

fn dir_size(dir: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            total += dir_size(&entry.path())?;
        } else if file_type.is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
