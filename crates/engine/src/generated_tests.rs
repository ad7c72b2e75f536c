// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn summary<'a>(branch: &'a str, others: &'a [String], langs: &'a BTreeSet<String>) -> BranchSummary<'a> {
    BranchSummary {
        project: "shop",
        branch,
        file_count: 3,
        other_branches: others,
        languages: langs,
        frameworks: langs,
    }
}

#[test]
fn main_readme_lists_the_other_branches() {
    let others = vec!["frontend".to_string(), "docs".to_string()];
    let empty = BTreeSet::new();
    let text = readme(&summary("main", &others, &empty));

    assert!(text.starts_with("# shop (main branch)"));
    assert!(text.contains("- `frontend`: user interface code"));
    assert!(text.contains("- `docs`: project documentation"));
    assert!(text.contains("Total files: 3"));
    assert!(!text.contains("Languages:"));
}

#[test]
fn frontend_readme_has_getting_started() {
    let langs: BTreeSet<String> = ["JavaScript".to_string()].into();
    let text = readme(&summary("frontend", &[], &langs));

    assert!(text.contains("User interface code"));
    assert!(text.contains("npm install"));
    assert!(text.contains("Languages: JavaScript"));
}

#[test]
fn unknown_branch_gets_generic_purpose() {
    let empty = BTreeSet::new();
    assert!(readme(&summary("misc", &[], &empty)).contains("A curated subset of the project."));
}

#[test]
fn gitignore_adds_branch_specific_block() {
    assert!(gitignore("frontend").contains(".next/"));
    assert!(gitignore("backend").contains("logs/"));
    let docs = gitignore("docs");
    assert!(docs.contains("node_modules/"));
    assert!(!docs.contains(".next/") && !docs.contains("logs/"));
}
