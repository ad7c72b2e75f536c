// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `forklift status`: show a job record written by an earlier `run`.

use super::{job_store, DEFAULT_OWNER};
use crate::exit_error::{ExitError, NOT_FOUND};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use fl_core::{JobId, OwnerId};
use fl_engine::env;
use fl_storage::JobStore;

#[derive(Args)]
pub struct StatusArgs {
    pub job_id: String,

    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

pub async fn handle(args: StatusArgs, format: OutputFormat) -> Result<()> {
    let store = job_store(&env::state_dir()?);
    let owner = OwnerId::new(args.owner.as_str());
    let job_id = JobId::new(args.job_id.as_str());

    match store.get(&owner, &job_id).await? {
        Some(job) => output::print_job(&job, format),
        None => Err(ExitError::new(NOT_FOUND, format!("no job {job_id} for {owner}")).into()),
    }
}
