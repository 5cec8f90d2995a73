//! Business logic use cases
//!
//! The orchestrator owns the wizard session; the capability use cases below
//! each wrap one port call.

pub mod check_duplicate_email;
pub mod save_registration;
pub mod send_confirmation;
pub mod wizard;

pub use check_duplicate_email::CheckDuplicateEmail;
pub use save_registration::SaveRegistration;
pub use send_confirmation::SendConfirmation;
pub use wizard::{WizardContext, WizardError, WizardOrchestrator};
