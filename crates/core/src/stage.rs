// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle stages.
//!
//! ```text
//! UPLOADED → EXTRACTING → SCANNING → ANALYZING → ORGANIZING
//!          → CREATING_REPO → PUBLISHING → COMPLETED
//! ```
//!
//! Any non-terminal stage may jump straight to `FAILED`. Nothing ever moves
//! backwards, and nothing leaves a terminal stage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Uploaded,
    Extracting,
    Scanning,
    Analyzing,
    Organizing,
    CreatingRepo,
    Publishing,
    Completed,
    Failed,
}

crate::simple_display! {
    Stage {
        Uploaded => "UPLOADED",
        Extracting => "EXTRACTING",
        Scanning => "SCANNING",
        Analyzing => "ANALYZING",
        Organizing => "ORGANIZING",
        CreatingRepo => "CREATING_REPO",
        Publishing => "PUBLISHING",
        Completed => "COMPLETED",
        Failed => "FAILED",
    }
}

/// Rejected stage transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid stage transition {from} -> {to}")]
pub struct TransitionError {
    pub from: Stage,
    pub to: Stage,
}

impl Stage {
    /// The non-failure path, in order.
    pub const SEQUENCE: [Stage; 8] = [
        Stage::Uploaded,
        Stage::Extracting,
        Stage::Scanning,
        Stage::Analyzing,
        Stage::Organizing,
        Stage::CreatingRepo,
        Stage::Publishing,
        Stage::Completed,
    ];

    /// Position along [`Stage::SEQUENCE`]; `None` for `Failed`.
    pub fn ordinal(self) -> Option<usize> {
        Self::SEQUENCE.iter().position(|s| *s == self)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Failed)
    }

    /// Progress percentage reported when the stage is entered.
    pub fn entry_percent(self) -> u8 {
        match self {
            Stage::Uploaded => 0,
            Stage::Extracting => 10,
            Stage::Scanning => 25,
            Stage::Analyzing => 50,
            Stage::Organizing => 75,
            Stage::CreatingRepo => 90,
            Stage::Publishing => 95,
            Stage::Completed => 100,
            // Failure keeps whatever percent the job had reached
            Stage::Failed => 0,
        }
    }

    /// User-facing status line for the stage.
    pub fn status_message(self) -> &'static str {
        match self {
            Stage::Uploaded => "File uploaded successfully",
            Stage::Extracting => "Extracting project files...",
            Stage::Scanning => "Performing security scan...",
            Stage::Analyzing => "Analyzing project structure...",
            Stage::Organizing => "Organizing project structure...",
            Stage::CreatingRepo => "Creating remote repository...",
            Stage::Publishing => "Pushing branches...",
            Stage::Completed => "Process completed successfully",
            Stage::Failed => "Processing failed",
        }
    }

    /// Whether `self → next` is allowed.
    ///
    /// Forward moves may skip stages; staying put is allowed so a stage can
    /// report intermediate progress.
    pub fn can_transition_to(self, next: Stage) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.ordinal(), next.ordinal()) {
            (_, None) => true,
            (Some(from), Some(to)) => to >= from,
            (None, Some(_)) => false,
        }
    }

    pub fn check_transition(self, next: Stage) -> Result<(), TransitionError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError { from: self, to: next })
        }
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
