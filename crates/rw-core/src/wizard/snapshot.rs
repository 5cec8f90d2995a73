use serde::{Deserialize, Serialize};

use crate::registration::RegistrationDraft;
use crate::submission::SubmissionOutcome;
use crate::validation::ValidationErrors;
use crate::wizard::{WizardNotice, WizardState, WizardStep};

/// Everything a presentation layer needs to render the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub draft: RegistrationDraft,
    pub step: WizardStep,
    pub errors: ValidationErrors,
    pub submission: SubmissionOutcome,
    pub notice: Option<WizardNotice>,
    pub selection_summary: String,
}

impl WizardSnapshot {
    pub fn new(draft: &RegistrationDraft, state: &WizardState) -> Self {
        Self {
            draft: draft.clone(),
            step: state.step,
            errors: state.errors.clone(),
            submission: state.submission,
            notice: state.notice.clone(),
            selection_summary: draft.selection_summary(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.submission.is_succeeded()
    }

    /// Whether the submit trigger should be enabled.
    pub fn submit_enabled(&self) -> bool {
        self.step.is_last() && !self.submission.is_in_flight() && !self.is_completed()
    }
}
