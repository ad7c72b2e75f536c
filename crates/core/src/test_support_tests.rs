// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::strategies::arb_transitions;
use crate::{Job, Stage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn accepted_transitions_never_regress(steps in arb_transitions()) {
        let mut job = Job::builder().build();
        for (stage, percent) in steps {
            let before = (job.stage, job.percent);
            if job.advance(stage, percent).is_ok() {
                prop_assert!(job.percent >= before.1);
                match (before.0.ordinal(), job.stage.ordinal()) {
                    (Some(from), Some(to)) => prop_assert!(to >= from),
                    (_, None) => prop_assert!(!before.0.is_terminal()),
                    (None, Some(_)) => prop_assert!(false, "left FAILED"),
                }
            } else {
                prop_assert_eq!((job.stage, job.percent), before);
            }
        }
    }
}

#[test]
fn outcome_counts_partial_failures() {
    let results = vec![
        super::pushed("main"),
        crate::BranchPublishResult::failed("docs", "/tmp/docs", "remote hung up"),
    ];
    let outcome = super::outcome("demo", results);
    assert_eq!(outcome.pushed_count(), 1);
    assert!(outcome.is_partial());
}
