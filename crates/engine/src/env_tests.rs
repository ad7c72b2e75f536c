// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    one = { "1", true },
    word = { "true", true },
    shouting = { "YES", true },
    padded = { " on ", true },
    zero = { "0", false },
    no = { "false", false },
    empty = { "", false },
    junk = { "sure", false },
)]
fn flag_values(raw: &str, expected: bool) {
    assert_eq!(parse_flag(raw), expected);
}

#[test]
fn git_timeout_defaults_to_subprocess_constant_when_unset() {
    if std::env::var("FORKLIFT_GIT_TIMEOUT_MS").is_err() {
        assert_eq!(git_timeout(), fl_adapters::subprocess::GIT_TIMEOUT);
    }
}
