// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file branch bucket heuristics.
//!
//! Paths are split into lowercase word tokens (directory names and the file
//! stem, split on non-alphanumerics), so `ui` matches `src/ui/button.js`
//! but not `build/guide.txt`. Rules are tried in order; the first match
//! wins and unmatched files live only on `main`.

use crate::tree::{extension, file_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Frontend,
    Backend,
    Docs,
    Infrastructure,
}

impl Bucket {
    /// Publish order after `main`
    pub const ORDER: [Bucket; 4] =
        [Bucket::Frontend, Bucket::Backend, Bucket::Docs, Bucket::Infrastructure];

    pub fn branch_name(self) -> &'static str {
        match self {
            Bucket::Frontend => "frontend",
            Bucket::Backend => "backend",
            Bucket::Docs => "docs",
            Bucket::Infrastructure => "infrastructure",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Bucket::Frontend => {
                &["frontend", "client", "ui", "web", "components", "component", "views", "pages"]
            }
            Bucket::Backend => &[
                "backend", "server", "api", "service", "services", "controller", "controllers",
                "model", "models", "routes", "handlers",
            ],
            Bucket::Docs => &["doc", "docs", "documentation", "readme", "wiki"],
            Bucket::Infrastructure => &[
                "config", "docker", "dockerfile", "compose", "k8s", "kubernetes", "helm",
                "terraform", "deploy", "deployment",
            ],
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Bucket::Frontend => &["jsx", "tsx", "vue", "svelte", "css", "scss", "sass", "less", "html"],
            Bucket::Backend => &[],
            Bucket::Docs => &["md", "rst", "adoc"],
            Bucket::Infrastructure => &["tf", "tfvars"],
        }
    }
}

/// Bucket for `path`, or `None` when the file belongs on `main` only.
pub fn assign(path: &str) -> Option<Bucket> {
    let lower = path.to_lowercase();
    let tokens = tokens(&lower);
    let ext = extension(file_name(&lower));
    Bucket::ORDER.into_iter().find(|bucket| {
        ext.is_some_and(|ext| bucket.extensions().contains(&ext))
            || tokens.iter().any(|t| bucket.keywords().contains(t))
    })
}

fn tokens(lower_path: &str) -> Vec<&str> {
    let name = file_name(lower_path);
    let dirs = &lower_path[..lower_path.len() - name.len()];
    let stem = match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    };
    dirs.split('/')
        .chain(std::iter::once(stem))
        .flat_map(|part| part.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "buckets_tests.rs"]
mod tests;
