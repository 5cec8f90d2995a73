//! # rw-core
//!
//! Core domain models and business logic for the event registration wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod ids;
pub mod ports;
pub mod registration;
pub mod submission;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::RegistrationId;
pub use registration::{
    DraftField, EventSlot, FieldStore, FieldStoreError, FirstTimeAttendee, RegistrationDraft,
    RegistrationRecord,
};
pub use submission::{SubmissionFailure, SubmissionOutcome};
pub use validation::{validate, ValidationErrors, ValidationPolicy};
pub use wizard::{WizardSnapshot, WizardState, WizardStep};
