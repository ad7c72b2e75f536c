// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_tree() -> FileTree {
    FileTree::builder()
        .file("src/app.jsx", "export const App = () => null;")
        .file("api/server.js", "require('http').createServer().listen(3000);")
        .file("README.md", "# Demo")
        .file("secrets.env", "password=supersecret123\n")
        .build()
}

#[test]
fn mixed_project_is_split_into_branches() {
    let plan = Classifier::new().unwrap().classify(&sample_tree());

    assert_eq!(plan.branch_files("frontend"), Some(&set(&["src/app.jsx"])));
    assert_eq!(plan.branch_files("backend"), Some(&set(&["api/server.js"])));
    assert_eq!(plan.branch_files("docs"), Some(&set(&["README.md"])));
    assert_eq!(plan.conflicts.secret_bearing, vec!["secrets.env"]);
    assert_eq!(
        plan.main_files(),
        &set(&["src/app.jsx", "api/server.js", "README.md", "secrets.env"])
    );
    assert_eq!(plan.branch_names(), vec!["main", "frontend", "backend", "docs"]);
}

#[test]
fn languages_and_frameworks_are_reported() {
    let plan = Classifier::new().unwrap().classify(&sample_tree());
    assert_eq!(plan.detected_languages, set(&["JavaScript"]));
    assert!(plan.detected_frameworks.contains("React"));
}

#[test]
fn classification_is_byte_identical_across_runs() {
    let classifier = Classifier::new().unwrap();
    let first = serde_json::to_string(&classifier.classify(&sample_tree())).unwrap();
    let second = serde_json::to_string(&Classifier::new().unwrap().classify(&sample_tree())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_tree_plans_empty_main_only() {
    let plan = Classifier::new().unwrap().classify(&FileTree::default());
    assert_eq!(plan.branch_names(), vec!["main"]);
    assert_eq!(plan.total_files(), 0);
}

fn arb_path() -> impl Strategy<Value = String> {
    let dirs = prop::sample::select(vec!["", "src/", "api/", "docs/", "client/", "k8s/", "lib/"]);
    let names = prop::sample::select(vec!["a.js", "b.tsx", "README.md", "main.tf", "x.py", "Util.rs"]);
    (dirs, names).prop_map(|(d, n)| format!("{d}{n}"))
}

proptest! {
    #[test]
    fn main_always_equals_the_full_tree(paths in prop::collection::vec(arb_path(), 0..20)) {
        let mut builder = FileTree::builder();
        for (i, path) in paths.iter().enumerate() {
            builder = builder.file(path, format!("{i}"));
        }
        let tree = builder.build();
        let plan = Classifier::new().unwrap().classify(&tree);

        let all: BTreeSet<String> = tree.paths().map(str::to_string).collect();
        prop_assert_eq!(plan.main_files(), &all);
        for (_, files) in plan.branches() {
            prop_assert!(files.is_subset(&all));
        }
    }
}
