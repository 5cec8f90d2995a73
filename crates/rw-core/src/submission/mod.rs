//! Submission outcome types.

use serde::{Deserialize, Serialize};

/// Why a submission attempt failed.
///
/// `ValidationIncomplete` and `DuplicateEmail` are fixed by the user on the
/// form. `CheckUnavailable` and `InsertError` are infrastructure failures the
/// user may simply retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SubmissionFailure {
    #[error("required fields are missing")]
    ValidationIncomplete,
    #[error("could not check for an existing registration")]
    CheckUnavailable,
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("could not save the registration")]
    InsertError,
}

impl SubmissionFailure {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmissionFailure::CheckUnavailable | SubmissionFailure::InsertError
        )
    }
}

/// Result of the latest submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    #[default]
    NotAttempted,
    InFlight,
    Succeeded,
    Failed(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionOutcome::InFlight)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded)
    }

    pub fn failure(&self) -> Option<SubmissionFailure> {
        match self {
            SubmissionOutcome::Failed(reason) => Some(*reason),
            _ => None,
        }
    }
}
