//! Registration wizard application layer
//!
//! This crate contains the use cases that drive the wizard state machine and
//! talk to the record store and notifier ports.

pub mod deps;
pub mod usecases;

pub use deps::{WizardDeps, WizardSettings};
pub use usecases::{WizardError, WizardOrchestrator};
