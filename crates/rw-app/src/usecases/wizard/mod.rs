//! Wizard use cases.
//!
//! This module exposes the wizard orchestrator and its shared context.

mod context;
pub mod orchestrator;

pub use context::{WizardContext, WizardSession};
pub use orchestrator::{WizardError, WizardOrchestrator};
