//! Step validation.
//!
//! Pure functions from `(step, draft)` to field errors. Errors only ever name
//! fields of the step being validated.

mod email;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registration::{DraftField, RegistrationDraft};
use crate::wizard::WizardStep;

pub use email::is_plausible_email;

pub const MSG_SELECT_EVENT: &str = "Please select at least one event.";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_FORMAT: &str = "Please enter a valid email address.";
pub const MSG_EMAIL_TAKEN: &str = "This email is already registered.";
pub const MSG_FULL_NAME_REQUIRED: &str = "Full name is required";
pub const MSG_CONTACT_REQUIRED: &str = "Contact number is required";
pub const MSG_ADDRESS_REQUIRED: &str = "Address is required";
pub const MSG_COMPANY_REQUIRED: &str = "Company/Affiliation is required";
pub const MSG_DESIGNATION_REQUIRED: &str = "Designation is required";
pub const MSG_FIRST_TIME_REQUIRED: &str = "Please specify if this is your first time attending.";

/// Knobs that tighten validation beyond the non-blank rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Also reject emails that fail [`is_plausible_email`].
    pub require_email_format: bool,
}

/// Field-level errors for one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<DraftField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl FromIterator<(DraftField, String)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (DraftField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validates one step with the default (non-blank only) policy.
pub fn validate(step: WizardStep, draft: &RegistrationDraft) -> ValidationErrors {
    validate_with(ValidationPolicy::default(), step, draft)
}

pub fn validate_with(
    policy: ValidationPolicy,
    step: WizardStep,
    draft: &RegistrationDraft,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match step {
        WizardStep::EventSelection => {
            if draft.selected_events.is_empty() {
                errors.insert(DraftField::SelectedEvents, MSG_SELECT_EVENT);
            }
        }
        WizardStep::PersonalInfo => {
            if is_blank(&draft.email) {
                errors.insert(DraftField::Email, MSG_EMAIL_REQUIRED);
            } else if policy.require_email_format && !is_plausible_email(draft.email.trim()) {
                errors.insert(DraftField::Email, MSG_EMAIL_FORMAT);
            }
            require_text(&mut errors, draft, DraftField::FullName, MSG_FULL_NAME_REQUIRED);
            require_text(&mut errors, draft, DraftField::ContactNumber, MSG_CONTACT_REQUIRED);
        }
        WizardStep::Affiliation => {
            require_text(&mut errors, draft, DraftField::Address, MSG_ADDRESS_REQUIRED);
            require_text(&mut errors, draft, DraftField::Company, MSG_COMPANY_REQUIRED);
            require_text(&mut errors, draft, DraftField::Designation, MSG_DESIGNATION_REQUIRED);
            if !draft.first_time_attendee.is_set() {
                errors.insert(DraftField::FirstTimeAttendee, MSG_FIRST_TIME_REQUIRED);
            }
        }
    }

    errors
}

/// Validates every step, returning only the steps that have errors.
pub fn validate_all(
    policy: ValidationPolicy,
    draft: &RegistrationDraft,
) -> Vec<(WizardStep, ValidationErrors)> {
    WizardStep::ALL
        .iter()
        .map(|step| (*step, validate_with(policy, *step, draft)))
        .filter(|(_, errors)| !errors.is_empty())
        .collect()
}

fn require_text(
    errors: &mut ValidationErrors,
    draft: &RegistrationDraft,
    field: DraftField,
    message: &str,
) {
    if draft.text(field).map_or(true, is_blank) {
        errors.insert(field, message);
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{EventSlot, FirstTimeAttendee};

    fn complete_draft() -> RegistrationDraft {
        let mut draft = RegistrationDraft::default();
        draft.selected_events.insert(EventSlot::Event1);
        draft.email = "a@x.com".into();
        draft.full_name = "Ada Lovelace".into();
        draft.contact_number = "+44 20 7946 0000".into();
        draft.address = "12 St James's Square".into();
        draft.company = "Analytical Engines Ltd".into();
        draft.designation = "Programmer".into();
        draft.first_time_attendee = FirstTimeAttendee::Yes;
        draft
    }

    #[test]
    fn empty_event_selection_is_rejected() {
        let errors = validate(WizardStep::EventSelection, &RegistrationDraft::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(DraftField::SelectedEvents), Some(MSG_SELECT_EVENT));
    }

    #[test]
    fn whitespace_only_values_count_as_blank() {
        let mut draft = complete_draft();
        draft.full_name = "   \t".into();
        draft.contact_number = "\n".into();

        let errors = validate(WizardStep::PersonalInfo, &draft);

        assert!(!errors.contains(DraftField::Email));
        assert_eq!(errors.get(DraftField::FullName), Some(MSG_FULL_NAME_REQUIRED));
        assert_eq!(errors.get(DraftField::ContactNumber), Some(MSG_CONTACT_REQUIRED));
    }

    #[test]
    fn errors_never_name_fields_of_other_steps() {
        let draft = RegistrationDraft::default();
        for step in WizardStep::ALL {
            let errors = validate(step, &draft);
            assert!(!errors.is_empty());
            for field in errors.fields() {
                assert!(step.fields().contains(&field), "{field} leaked into {step}");
            }
        }
    }

    #[test]
    fn complete_draft_satisfies_every_step() {
        let draft = complete_draft();
        for step in WizardStep::ALL {
            assert!(validate(step, &draft).is_empty(), "{step} should pass");
        }
        assert!(validate_all(ValidationPolicy::default(), &draft).is_empty());
    }

    #[test]
    fn affiliation_requires_attendee_answer() {
        let mut draft = complete_draft();
        draft.first_time_attendee = FirstTimeAttendee::Unset;

        let errors = validate(WizardStep::Affiliation, &draft);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(DraftField::FirstTimeAttendee),
            Some(MSG_FIRST_TIME_REQUIRED)
        );
    }

    #[test]
    fn email_format_only_checked_when_policy_asks() {
        let mut draft = complete_draft();
        draft.email = "not-an-email".into();

        assert!(validate(WizardStep::PersonalInfo, &draft).is_empty());

        let strict = ValidationPolicy {
            require_email_format: true,
        };
        let errors = validate_with(strict, WizardStep::PersonalInfo, &draft);
        assert_eq!(errors.get(DraftField::Email), Some(MSG_EMAIL_FORMAT));
    }

    #[test]
    fn validate_all_reports_each_failing_step() {
        let mut draft = complete_draft();
        draft.selected_events.clear();
        draft.designation.clear();

        let failing: Vec<WizardStep> = validate_all(ValidationPolicy::default(), &draft)
            .into_iter()
            .map(|(step, _)| step)
            .collect();

        assert_eq!(failing, vec![WizardStep::EventSelection, WizardStep::Affiliation]);
    }

    #[test]
    fn validation_errors_serialize_as_field_map() {
        let errors = validate(WizardStep::EventSelection, &RegistrationDraft::default());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["selectedEvents"], MSG_SELECT_EVENT);
    }
}
