// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    zip    = { "project.zip",        Some(".zip") },
    tar_gz = { "Project.TAR.GZ",     Some(".tar.gz") },
    tgz    = { "bundle.tgz",         Some(".tgz") },
    seven  = { "old.7z",             Some(".7z") },
    plain  = { "notes.txt",          None },
)]
fn archive_extension(name: &str, expected: Option<&str>) {
    assert_eq!(Upload::new(name, "/tmp/x", 1).archive_extension(), expected);
}

#[test]
fn accepts_a_regular_archive() {
    assert_eq!(Upload::new("app.zip", "/tmp/app.zip", 1024).validate(), Ok(()));
}

#[test]
fn rejects_empty_upload() {
    assert_eq!(Upload::new("app.zip", "/tmp/app.zip", 0).validate(), Err(ValidationError::Empty));
}

#[test]
fn rejects_oversize_upload() {
    let err = Upload::new("app.zip", "/tmp/app.zip", MAX_UPLOAD_BYTES + 1).validate().unwrap_err();
    assert!(matches!(err, ValidationError::TooLarge { .. }));
}

#[test]
fn rejects_unknown_format_without_archive_content_type() {
    let err = Upload::new("app.exe", "/tmp/app.exe", 10).validate().unwrap_err();
    assert_eq!(err, ValidationError::UnsupportedFormat("app.exe".into()));
}

#[test]
fn archive_content_type_rescues_odd_name() {
    let upload = Upload::new("download", "/tmp/download", 10).with_content_type("application/zip");
    assert_eq!(upload.validate(), Ok(()));
}

#[test]
fn blank_name_is_rejected() {
    assert_eq!(Upload::new("  ", "/tmp/x", 10).validate(), Err(ValidationError::MissingName));
}

#[test]
fn unpacked_directory_is_accepted_by_content_type() {
    let upload = Upload::new("my-project", "/srv/my-project", 4096).with_content_type(DIRECTORY_CONTENT_TYPE);
    assert!(upload.validate().is_ok());
}
