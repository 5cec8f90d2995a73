use crate::registration::DraftField;
use crate::wizard::{WizardSnapshot, WizardStep};

/// Push channel towards the presentation layer.
#[async_trait::async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot);

    /// Forward navigation was refused. Default is to rely on the snapshot.
    async fn emit_advance_blocked(&self, _step: WizardStep, _fields: Vec<DraftField>) {}
}
