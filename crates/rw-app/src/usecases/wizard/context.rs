use std::sync::Arc;

use rw_core::registration::FieldStore;
use rw_core::wizard::{WizardSnapshot, WizardState};
use tokio::sync::{Mutex, MutexGuard};

/// Field store and wizard state, guarded together.
#[derive(Debug, Default)]
pub struct WizardSession {
    pub store: FieldStore,
    pub state: WizardState,
}

impl WizardSession {
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot::new(self.store.get(), &self.state)
    }
}

/// Shared wizard context.
///
/// One mutex covers both the draft and the wizard state so a successful
/// submission can clear the draft and reset the step in one critical section.
/// The lock is only held while applying a transition, never across a port
/// call, so edits and navigation keep working while a submission is pending.
#[derive(Clone, Default)]
pub struct WizardContext {
    session: Arc<Mutex<WizardSession>>,
}

impl WizardContext {
    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn lock(&self) -> MutexGuard<'_, WizardSession> {
        self.session.lock().await
    }
}
