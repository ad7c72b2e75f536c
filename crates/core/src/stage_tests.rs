// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    uploaded      = { Stage::Uploaded,     "\"UPLOADED\"" },
    creating_repo = { Stage::CreatingRepo, "\"CREATING_REPO\"" },
    publishing    = { Stage::Publishing,   "\"PUBLISHING\"" },
    failed        = { Stage::Failed,       "\"FAILED\"" },
)]
fn stage_serializes_screaming(stage: Stage, json: &str) {
    assert_eq!(serde_json::to_string(&stage).unwrap(), json);
    assert_eq!(stage.to_string(), json.trim_matches('"'));
}

#[yare::parameterized(
    uploaded  = { Stage::Uploaded,  false },
    analyzing = { Stage::Analyzing, false },
    completed = { Stage::Completed, true },
    failed    = { Stage::Failed,    true },
)]
fn terminal_iff_completed_or_failed(stage: Stage, expected: bool) {
    assert_eq!(stage.is_terminal(), expected);
}

#[test]
fn entry_percent_is_non_decreasing_along_sequence() {
    let percents: Vec<u8> = Stage::SEQUENCE.iter().map(|s| s.entry_percent()).collect();
    assert!(percents.windows(2).all(|w| w[0] <= w[1]), "{percents:?}");
    assert_eq!(percents.last(), Some(&100));
}

#[test]
fn every_non_terminal_stage_can_fail() {
    for stage in Stage::SEQUENCE.iter().filter(|s| !s.is_terminal()) {
        assert!(stage.can_transition_to(Stage::Failed), "{stage} -> FAILED");
    }
}

#[test]
fn terminal_stages_are_sinks() {
    for next in Stage::SEQUENCE {
        assert!(!Stage::Completed.can_transition_to(next));
        assert!(!Stage::Failed.can_transition_to(next));
    }
    assert!(!Stage::Completed.can_transition_to(Stage::Failed));
}

#[test]
fn backwards_transition_is_rejected() {
    let err = Stage::Organizing.check_transition(Stage::Extracting).unwrap_err();
    assert_eq!(err, TransitionError { from: Stage::Organizing, to: Stage::Extracting });
    assert_eq!(err.to_string(), "invalid stage transition ORGANIZING -> EXTRACTING");
}

#[test]
fn forward_and_same_stage_transitions_are_allowed() {
    assert!(Stage::Analyzing.can_transition_to(Stage::Analyzing));
    assert!(Stage::Uploaded.can_transition_to(Stage::Publishing));
    assert!(Stage::Publishing.can_transition_to(Stage::Completed));
}
