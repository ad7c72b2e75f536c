// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::tree::HASH_CEILING_BYTES;

#[test]
fn identical_duplicates_keep_one() {
    let tree = FileTree::builder()
        .file("docs/config.json", "{}")
        .file("src/config.json", "{}")
        .build();
    let dup = &detect(&tree).duplicates[0];

    assert_eq!(dup.file_name, "config.json");
    assert!(dup.same_content);
    assert_eq!(dup.resolution, DuplicateResolution::KeepOne { recommended: "src/config.json".into() });
}

#[test]
fn any_byte_difference_means_rename() {
    let tree = FileTree::builder().file("a/util.js", "x").file("b/util.js", "y").build();
    let dup = &detect(&tree).duplicates[0];

    assert!(!dup.same_content);
    assert_eq!(
        dup.resolution,
        DuplicateResolution::Rename { renamed: vec!["a/util_1.js".into(), "b/util_2.js".into()] }
    );
}

#[test]
fn keeper_falls_back_to_shortest_path() {
    let tree = FileTree::builder().file("very/deep/x.txt", "s").file("top/x.txt", "s").build();
    let dup = &detect(&tree).duplicates[0];
    assert_eq!(dup.resolution, DuplicateResolution::KeepOne { recommended: "top/x.txt".into() });
}

#[test]
fn unhashed_members_do_not_break_sameness() {
    let tree = FileTree::builder()
        .file("a/blob.bin", "same")
        .sized("b/blob.bin", HASH_CEILING_BYTES + 1)
        .build();
    assert!(detect(&tree).duplicates[0].same_content);
}

#[test]
fn oversized_files_get_display_size() {
    let tree = FileTree::builder().sized("assets/video.mp4", 150 * 1024 * 1024).file("small.txt", "x").build();
    let oversized = detect(&tree).oversized;

    assert_eq!(oversized.len(), 1);
    assert_eq!(oversized[0].path, "assets/video.mp4");
    assert_eq!(oversized[0].display_size, "150.0 MB");
}

#[test]
fn case_only_collisions_are_reported() {
    let tree = FileTree::builder().file("a/Readme.txt", "1").file("b/README.txt", "2").file("c/other.txt", "3").build();
    let collisions = detect(&tree).case_collisions;

    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].names, vec!["README.txt", "Readme.txt"]);
    assert_eq!(collisions[0].paths, vec!["a/Readme.txt", "b/README.txt"]);
}

#[test]
fn exact_duplicates_are_not_case_collisions() {
    let tree = FileTree::builder().file("a/x.txt", "1").file("b/x.txt", "2").build();
    assert!(detect(&tree).case_collisions.is_empty());
}

#[test]
fn clean_tree_has_no_conflicts() {
    let tree = FileTree::builder().file("src/main.rs", "fn main() {}").build();
    assert!(!detect(&tree).has_conflicts());
}
