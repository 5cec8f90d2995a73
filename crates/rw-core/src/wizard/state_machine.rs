//! Wizard state machine.
//!
//! Defines a pure state transition function for the registration wizard. The
//! orchestrator feeds it user intents and the results of its own I/O, then
//! executes the returned actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RegistrationId;
use crate::registration::{DraftField, RegistrationDraft, RegistrationRecord};
use crate::submission::{SubmissionFailure, SubmissionOutcome};
use crate::validation::{
    validate_all, validate_with, ValidationErrors, ValidationPolicy, MSG_EMAIL_TAKEN,
};
use crate::wizard::WizardStep;

/// Blocking or retryable notice shown over the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WizardNotice {
    /// Final submit attempted with required fields still blank.
    MissingRequiredFields { steps: Vec<WizardStep> },
    /// The duplicate check could not reach the record store.
    CheckUnavailable,
    /// The insert was refused or never arrived.
    SubmitFailed,
}

impl WizardNotice {
    pub fn message(&self) -> &'static str {
        match self {
            WizardNotice::MissingRequiredFields { .. } => {
                "Please fill in all required fields before submitting."
            }
            WizardNotice::CheckUnavailable => "Error checking existing registration.",
            WizardNotice::SubmitFailed => "Error submitting the form. Please try again.",
        }
    }
}

/// Wizard state, excluding the draft itself (owned by the field store).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub errors: ValidationErrors,
    pub notice: Option<WizardNotice>,
    pub submission: SubmissionOutcome,
}

impl WizardState {
    /// Terminal success view is showing.
    pub fn is_completed(&self) -> bool {
        self.submission.is_succeeded()
    }

    /// Submit is offered only on the last step with nothing pending.
    pub fn can_submit(&self) -> bool {
        self.step.is_last() && !self.submission.is_in_flight() && !self.is_completed()
    }
}

/// Events that drive the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// User asks for the next step.
    Advance,
    /// User asks for the previous step.
    Retreat,
    /// User submits from the last step. The id and timestamp stamp the record.
    Submit {
        id: RegistrationId,
        submitted_at: DateTime<Utc>,
    },
    /// User leaves the success view to register again.
    Restart,

    // Results (from orchestrator)
    DuplicateCheckUnavailable,
    DuplicateEmailDetected,
    DuplicateCheckPassed { record: RegistrationRecord },
    InsertFailed,
    InsertSucceeded { record: RegistrationRecord },
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Forward navigation was refused.
    AdvanceBlocked {
        step: WizardStep,
        fields: Vec<DraftField>,
    },
    /// Look for existing registrations with the record's email.
    CheckDuplicate { record: RegistrationRecord },
    /// Persist the record.
    InsertRegistration { record: RegistrationRecord },
    /// Clear the draft held by the field store.
    ResetDraft,
    /// Fire-and-forget confirmation message.
    SendConfirmation { email: String, full_name: String },
}

/// Pure wizard state machine.
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(
        state: WizardState,
        event: WizardEvent,
        draft: &RegistrationDraft,
        policy: ValidationPolicy,
    ) -> (WizardState, Vec<WizardAction>) {
        if state.is_completed() {
            return match event {
                WizardEvent::Restart => (WizardState::default(), Vec::new()),
                event => Self::ignore(state, event),
            };
        }

        match event {
            WizardEvent::Advance => {
                let errors = validate_with(policy, state.step, draft);
                if errors.is_empty() {
                    let next = WizardState {
                        step: state.step.next(),
                        errors,
                        notice: None,
                        ..state
                    };
                    (next, Vec::new())
                } else {
                    let action = WizardAction::AdvanceBlocked {
                        step: state.step,
                        fields: errors.fields().collect(),
                    };
                    (WizardState { errors, ..state }, vec![action])
                }
            }
            WizardEvent::Retreat => (
                WizardState {
                    step: state.step.previous(),
                    errors: ValidationErrors::new(),
                    notice: None,
                    ..state
                },
                Vec::new(),
            ),
            WizardEvent::Submit { id, submitted_at } => {
                if !state.can_submit() {
                    return Self::ignore(state, WizardEvent::Submit { id, submitted_at });
                }
                Self::begin_submission(state, draft, policy, id, submitted_at)
            }
            event @ (WizardEvent::DuplicateCheckUnavailable
            | WizardEvent::DuplicateEmailDetected
            | WizardEvent::DuplicateCheckPassed { .. }
            | WizardEvent::InsertFailed
            | WizardEvent::InsertSucceeded { .. }) => {
                if !state.submission.is_in_flight() {
                    return Self::ignore(state, event);
                }
                Self::resolve_submission(state, event)
            }
            WizardEvent::Restart => Self::ignore(state, WizardEvent::Restart),
        }
    }

    fn begin_submission(
        state: WizardState,
        draft: &RegistrationDraft,
        policy: ValidationPolicy,
        id: RegistrationId,
        submitted_at: DateTime<Utc>,
    ) -> (WizardState, Vec<WizardAction>) {
        let failing = validate_all(policy, draft);
        if !failing.is_empty() {
            return (Self::incomplete(state, draft, policy, failing), Vec::new());
        }

        match RegistrationRecord::from_draft(draft, id, submitted_at) {
            Ok(record) => (
                WizardState {
                    errors: ValidationErrors::new(),
                    notice: None,
                    submission: SubmissionOutcome::InFlight,
                    ..state
                },
                vec![WizardAction::CheckDuplicate { record }],
            ),
            Err(_) => {
                let failing = vec![(state.step, validate_with(policy, state.step, draft))];
                (Self::incomplete(state, draft, policy, failing), Vec::new())
            }
        }
    }

    fn incomplete(
        state: WizardState,
        draft: &RegistrationDraft,
        policy: ValidationPolicy,
        failing: Vec<(WizardStep, ValidationErrors)>,
    ) -> WizardState {
        WizardState {
            errors: validate_with(policy, state.step, draft),
            notice: Some(WizardNotice::MissingRequiredFields {
                steps: failing.into_iter().map(|(step, _)| step).collect(),
            }),
            submission: SubmissionOutcome::Failed(SubmissionFailure::ValidationIncomplete),
            ..state
        }
    }

    fn resolve_submission(
        state: WizardState,
        event: WizardEvent,
    ) -> (WizardState, Vec<WizardAction>) {
        match event {
            WizardEvent::DuplicateCheckUnavailable => (
                WizardState {
                    notice: Some(WizardNotice::CheckUnavailable),
                    submission: SubmissionOutcome::Failed(SubmissionFailure::CheckUnavailable),
                    ..state
                },
                Vec::new(),
            ),
            WizardEvent::DuplicateEmailDetected => {
                let mut errors = ValidationErrors::new();
                errors.insert(DraftField::Email, MSG_EMAIL_TAKEN);
                (
                    WizardState {
                        step: WizardStep::PersonalInfo,
                        errors,
                        notice: None,
                        submission: SubmissionOutcome::Failed(SubmissionFailure::DuplicateEmail),
                    },
                    Vec::new(),
                )
            }
            WizardEvent::DuplicateCheckPassed { record } => {
                (state, vec![WizardAction::InsertRegistration { record }])
            }
            WizardEvent::InsertFailed => (
                WizardState {
                    notice: Some(WizardNotice::SubmitFailed),
                    submission: SubmissionOutcome::Failed(SubmissionFailure::InsertError),
                    ..state
                },
                Vec::new(),
            ),
            WizardEvent::InsertSucceeded { record } => (
                WizardState {
                    step: WizardStep::FIRST,
                    errors: ValidationErrors::new(),
                    notice: None,
                    submission: SubmissionOutcome::Succeeded,
                },
                vec![
                    WizardAction::ResetDraft,
                    WizardAction::SendConfirmation {
                        email: record.email,
                        full_name: record.full_name,
                    },
                ],
            ),
            event => Self::ignore(state, event),
        }
    }

    fn ignore(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        tracing::debug!(step = ?state.step, submission = ?state.submission, ?event, "wizard event ignored");
        (state, Vec::new())
    }
}
