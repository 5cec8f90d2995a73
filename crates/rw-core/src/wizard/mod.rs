//! Wizard domain module.
//!
//! This module defines the registration wizard steps and state machine types.

mod snapshot;
pub mod state_machine;
mod step;

pub use snapshot::WizardSnapshot;
pub use state_machine::{WizardAction, WizardEvent, WizardNotice, WizardState, WizardStateMachine};
pub use step::WizardStep;
