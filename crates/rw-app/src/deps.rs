//! # Wizard Dependencies
//!
//! Parameter grouping for [`WizardOrchestrator`](crate::WizardOrchestrator)
//! construction. This is NOT a Builder pattern: no build steps, no default
//! values, no hidden logic.

use std::sync::Arc;
use std::time::Duration;

use rw_core::ports::{
    ClockPort, ConfirmationNotifierPort, RegistrationRepositoryPort, WizardEventPort,
};
use rw_core::validation::ValidationPolicy;

/// Ports the wizard talks to. All dependencies are required.
pub struct WizardDeps {
    pub registrations: Arc<dyn RegistrationRepositoryPort>,
    pub notifier: Arc<dyn ConfirmationNotifierPort>,
    pub events: Arc<dyn WizardEventPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Behaviour switches resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct WizardSettings {
    pub policy: ValidationPolicy,
    /// Upper bound for each record store call.
    pub request_timeout: Duration,
    /// Send the confirmation message after a successful insert.
    pub send_confirmation: bool,
}
