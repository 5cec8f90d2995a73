//! Field store.
//!
//! Single owner of the draft. Mutation only goes through `set_field` and
//! `toggle_event`; nothing here validates.

use thiserror::Error;

use crate::registration::{DraftField, EventSlot, FirstTimeAttendee, RegistrationDraft};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldStoreError {
    #[error("field {0} is not a text field")]
    NotATextField(DraftField),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: DraftField, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    draft: RegistrationDraft,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Overwrites exactly one field.
    ///
    /// `firstTime` takes `yes`, `no` or an empty string. `selectedEvents` is
    /// rejected, event membership goes through [`FieldStore::toggle_event`].
    pub fn set_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), FieldStoreError> {
        let value = value.into();
        match field {
            DraftField::SelectedEvents => Err(FieldStoreError::NotATextField(field)),
            DraftField::FirstTimeAttendee => {
                let parsed = value
                    .parse::<FirstTimeAttendee>()
                    .map_err(|reason| FieldStoreError::InvalidValue { field, reason })?;
                self.draft.first_time_attendee = parsed;
                Ok(())
            }
            text_field => {
                let slot = self
                    .draft
                    .text_mut(text_field)
                    .ok_or(FieldStoreError::NotATextField(text_field))?;
                *slot = value;
                Ok(())
            }
        }
    }

    /// Adds or removes an event. Both directions are idempotent.
    pub fn toggle_event(&mut self, slot: EventSlot, present: bool) {
        if present {
            self.draft.selected_events.insert(slot);
        } else {
            self.draft.selected_events.remove(&slot);
        }
    }

    pub fn reset(&mut self) {
        self.draft = RegistrationDraft::default();
    }
}
