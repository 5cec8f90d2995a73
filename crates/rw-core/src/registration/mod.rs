//! Registration domain: the draft, its field store and the persisted record.

mod draft;
mod record;
mod store;

pub use draft::{DraftField, EventSlot, FirstTimeAttendee, RegistrationDraft};
pub use record::{IncompleteDraft, RegistrationRecord};
pub use store::{FieldStore, FieldStoreError};
