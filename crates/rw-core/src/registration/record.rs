use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RegistrationId;
use crate::registration::{DraftField, EventSlot, RegistrationDraft};

/// A completed registration as handed to the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub id: RegistrationId,
    pub email: String,
    pub full_name: String,
    pub contact_number: String,
    pub address: String,
    pub company: String,
    pub designation: String,
    pub first_time_attendee: bool,
    /// Ascending slot order.
    pub selected_events: Vec<EventSlot>,
    pub submitted_at: DateTime<Utc>,
}

/// Returned when a draft cannot be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("draft is missing {0}")]
pub struct IncompleteDraft(pub DraftField);

impl RegistrationRecord {
    pub fn from_draft(
        draft: &RegistrationDraft,
        id: RegistrationId,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, IncompleteDraft> {
        let first_time_attendee = draft
            .first_time_attendee
            .as_bool()
            .ok_or(IncompleteDraft(DraftField::FirstTimeAttendee))?;

        Ok(Self {
            id,
            email: draft.email.clone(),
            full_name: draft.full_name.clone(),
            contact_number: draft.contact_number.clone(),
            address: draft.address.clone(),
            company: draft.company.clone(),
            designation: draft.designation.clone(),
            first_time_attendee,
            selected_events: draft.selected_events.iter().copied().collect(),
            submitted_at,
        })
    }
}
