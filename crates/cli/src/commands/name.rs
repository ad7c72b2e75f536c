// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use fl_core::derive_repo_name;

#[derive(Args)]
pub struct NameArgs {
    /// Upload file name, e.g. "My Project (1).zip"
    pub file_name: String,
}

pub fn handle(args: NameArgs, format: OutputFormat) -> Result<()> {
    let name = derive_repo_name(&args.file_name);
    match format {
        OutputFormat::Text => println!("{name}"),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "fileName": args.file_name, "repositoryName": name }))
        }
    }
    Ok(())
}
