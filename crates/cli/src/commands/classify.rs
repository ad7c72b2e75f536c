// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `forklift classify`: dry run of the analysis stage on a local directory.

use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use clap::Args;
use fl_classify::{Classifier, FileTree};
use std::path::PathBuf;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Unpacked project directory
    pub dir: PathBuf,
}

pub fn handle(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("{} is not a directory", args.dir.display());
    }
    let tree = FileTree::scan(&args.dir)?;
    tracing::debug!(root = %args.dir.display(), files = tree.len(), "scanned project");
    let plan = Classifier::new()?.classify(&tree);
    output::print_plan(&plan, format)
}
