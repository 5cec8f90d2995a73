//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the wizard logic to remain independent of the record
//! store, the mail service and the presentation layer.

mod clock;
pub mod notifier;
pub mod registration_repository;
mod wizard_event_port;

pub use clock::ClockPort;
pub use notifier::{ConfirmationNotifierPort, NotifierError};
pub use registration_repository::{RegistrationRepositoryError, RegistrationRepositoryPort};
pub use wizard_event_port::WizardEventPort;
