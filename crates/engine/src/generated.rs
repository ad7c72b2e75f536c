// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Files added to every branch working copy.

use std::collections::BTreeSet;
use std::fmt::Write;

pub const README_FILE: &str = "README.md";
pub const GITIGNORE_FILE: &str = ".gitignore";

/// What the README needs to know about the branch
pub struct BranchSummary<'a> {
    pub project: &'a str,
    pub branch: &'a str,
    pub file_count: usize,
    pub other_branches: &'a [String],
    pub languages: &'a BTreeSet<String>,
    pub frameworks: &'a BTreeSet<String>,
}

pub fn readme(summary: &BranchSummary<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} ({} branch)\n", summary.project, summary.branch);

    match summary.branch {
        "main" => {
            out.push_str("The complete project, every file as uploaded.\n\n");
            if !summary.other_branches.is_empty() {
                out.push_str("## Branches\n\n");
                for name in summary.other_branches {
                    let _ = writeln!(out, "- `{name}`: {}", purpose(name));
                }
                out.push('\n');
            }
        }
        branch => {
            let _ = writeln!(out, "{}.\n", capitalize(purpose(branch)));
            if branch == "frontend" {
                out.push_str("## Getting started\n\n");
                out.push_str("1. Install dependencies: `npm install`\n");
                out.push_str("2. Start a development server: `npm start`\n\n");
            }
        }
    }

    if !summary.languages.is_empty() {
        let _ = writeln!(out, "Languages: {}\n", join(summary.languages));
    }
    if !summary.frameworks.is_empty() {
        let _ = writeln!(out, "Frameworks: {}\n", join(summary.frameworks));
    }

    let _ = writeln!(out, "## Files in this branch\n\nTotal files: {}", summary.file_count);
    out
}

pub fn gitignore(branch: &str) -> String {
    let mut out = String::from(COMMON_IGNORES);
    match branch {
        "frontend" => out.push_str(FRONTEND_IGNORES),
        "backend" => out.push_str(BACKEND_IGNORES),
        _ => {}
    }
    out
}

fn purpose(branch: &str) -> &'static str {
    match branch {
        "main" => "complete project",
        "frontend" => "user interface code, styles and client-side assets",
        "backend" => "server code, APIs and data access",
        "docs" => "project documentation",
        "infrastructure" => "build, deployment and environment configuration",
        _ => "a curated subset of the project",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

const COMMON_IGNORES: &str = "\
# Dependencies
node_modules/
vendor/

# Build outputs
dist/
build/
target/
out/

# Environment files
.env
.env.local
.env.production

# IDE files
.vscode/
.idea/
*.swp
*.swo

# OS files
.DS_Store
Thumbs.db
";

const FRONTEND_IGNORES: &str = "
# Frontend
npm-debug.log*
yarn-debug.log*
yarn-error.log*
.next/
.nuxt/
";

const BACKEND_IGNORES: &str = "
# Backend
*.log
logs/
*.pid
*.seed
";

#[cfg(test)]
#[path = "generated_tests.rs"]
mod tests;
