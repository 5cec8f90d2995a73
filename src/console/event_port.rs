use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rw_core::ports::WizardEventPort;
use rw_core::wizard::{WizardNotice, WizardSnapshot};
use rw_core::{DraftField, SubmissionOutcome, ValidationErrors, WizardStep};
use tracing::warn;

use crate::console::render::SnapshotRenderer;

/// The parts of a snapshot that warrant a redraw. Draft edits alone do not.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderKey {
    step: WizardStep,
    errors: ValidationErrors,
    notice: Option<WizardNotice>,
    submission: SubmissionOutcome,
}

impl From<&WizardSnapshot> for RenderKey {
    fn from(snapshot: &WizardSnapshot) -> Self {
        Self {
            step: snapshot.step,
            errors: snapshot.errors.clone(),
            notice: snapshot.notice.clone(),
            submission: snapshot.submission,
        }
    }
}

/// Writes pushed snapshots to a terminal.
pub struct ConsoleEventPort<W> {
    renderer: Arc<dyn SnapshotRenderer>,
    out: Mutex<W>,
    last: Mutex<Option<RenderKey>>,
}

impl<W: Write + Send> ConsoleEventPort<W> {
    pub fn new(renderer: Arc<dyn SnapshotRenderer>, out: W) -> Self {
        Self {
            renderer,
            out: Mutex::new(out),
            last: Mutex::new(None),
        }
    }

    /// Renders unconditionally, e.g. for `show`.
    pub fn render_now(&self, snapshot: &WizardSnapshot) {
        self.remember(snapshot);
        self.write_block(&self.renderer.render(snapshot));
    }

    pub fn print(&self, text: &str) {
        self.write_block(text);
    }

    /// Returns `true` if the snapshot differs from the last one drawn.
    fn remember(&self, snapshot: &WizardSnapshot) -> bool {
        let key = RenderKey::from(snapshot);
        let Ok(mut last) = self.last.lock() else {
            return true;
        };
        if last.as_ref() == Some(&key) {
            return false;
        }
        *last = Some(key);
        true
    }

    fn write_block(&self, text: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            warn!(error = %err, "console write failed");
        }
    }
}

#[async_trait]
impl<W: Write + Send> WizardEventPort for ConsoleEventPort<W> {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot) {
        if self.remember(&snapshot) {
            self.write_block(&self.renderer.render(&snapshot));
        }
    }

    async fn emit_advance_blocked(&self, step: WizardStep, fields: Vec<DraftField>) {
        self.write_block(&self.renderer.render_blocked(step, &fields));
    }
}
