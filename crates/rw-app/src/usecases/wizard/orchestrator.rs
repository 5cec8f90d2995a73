//! Wizard orchestrator.
//!
//! This module coordinates the wizard state machine, the field store and the
//! record store side effects.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, info_span, warn, Instrument};

use rw_core::ports::{ClockPort, WizardEventPort};
use rw_core::registration::{DraftField, EventSlot, FieldStoreError};
use rw_core::validation::ValidationPolicy;
use rw_core::wizard::{WizardAction, WizardEvent, WizardSnapshot, WizardStateMachine};
use rw_core::RegistrationId;

use crate::deps::{WizardDeps, WizardSettings};
use crate::usecases::wizard::context::WizardContext;
use crate::usecases::{CheckDuplicateEmail, SaveRegistration, SendConfirmation};

/// Errors produced by the wizard orchestrator.
///
/// Only malformed intents end up here. Record store and notifier failures are
/// reported through the snapshot's submission outcome instead.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Field(#[from] FieldStoreError),
    #[error("registration already completed, restart the wizard to edit")]
    Completed,
}

/// Orchestrator that drives wizard state and side effects.
pub struct WizardOrchestrator {
    context: Arc<WizardContext>,
    policy: ValidationPolicy,

    check_duplicate: Arc<CheckDuplicateEmail>,
    save_registration: Arc<SaveRegistration>,
    send_confirmation: Option<Arc<SendConfirmation>>,
    events: Arc<dyn WizardEventPort>,
    clock: Arc<dyn ClockPort>,
}

impl WizardOrchestrator {
    pub fn new(deps: WizardDeps, settings: WizardSettings) -> Self {
        Self::with_context(WizardContext::default().arc(), deps, settings)
    }

    pub fn with_context(
        context: Arc<WizardContext>,
        deps: WizardDeps,
        settings: WizardSettings,
    ) -> Self {
        let send_confirmation = settings
            .send_confirmation
            .then(|| Arc::new(SendConfirmation::new(deps.notifier)));

        Self {
            context,
            policy: settings.policy,
            check_duplicate: Arc::new(CheckDuplicateEmail::new(
                Arc::clone(&deps.registrations),
                settings.request_timeout,
            )),
            save_registration: Arc::new(SaveRegistration::new(
                deps.registrations,
                settings.request_timeout,
            )),
            send_confirmation,
            events: deps.events,
            clock: deps.clock,
        }
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        self.context.snapshot().await
    }

    pub async fn set_field(
        &self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<WizardSnapshot, WizardError> {
        let snapshot = {
            let mut session = self.context.lock().await;
            if session.state.is_completed() {
                return Err(WizardError::Completed);
            }
            session.store.set_field(field, value)?;
            session.snapshot()
        };
        self.events.emit_state_changed(snapshot.clone()).await;
        Ok(snapshot)
    }

    pub async fn toggle_event(
        &self,
        slot: EventSlot,
        present: bool,
    ) -> Result<WizardSnapshot, WizardError> {
        let snapshot = {
            let mut session = self.context.lock().await;
            if session.state.is_completed() {
                return Err(WizardError::Completed);
            }
            session.store.toggle_event(slot, present);
            session.snapshot()
        };
        self.events.emit_state_changed(snapshot.clone()).await;
        Ok(snapshot)
    }

    pub async fn advance(&self) -> WizardSnapshot {
        self.dispatch(WizardEvent::Advance).await
    }

    pub async fn retreat(&self) -> WizardSnapshot {
        self.dispatch(WizardEvent::Retreat).await
    }

    pub async fn restart(&self) -> WizardSnapshot {
        self.dispatch(WizardEvent::Restart).await
    }

    /// Runs the full submission: revalidation, duplicate check, insert.
    ///
    /// A call made while another submission is pending returns the current
    /// snapshot without touching the record store.
    pub async fn submit(&self) -> WizardSnapshot {
        let event = WizardEvent::Submit {
            id: RegistrationId::generate(),
            submitted_at: self.now(),
        };
        self.dispatch(event).await
    }

    pub async fn dispatch(&self, event: WizardEvent) -> WizardSnapshot {
        let span = info_span!("usecase.wizard_orchestrator.dispatch", event = event_name(&event));
        async {
            let mut pending_events = vec![event];
            let mut latest = None;

            while let Some(event) = pending_events.pop() {
                let (snapshot, actions) = self.apply(event).await;
                latest = Some(snapshot);
                pending_events.extend(self.execute_actions(actions).await);
            }

            match latest {
                Some(snapshot) => snapshot,
                None => self.context.snapshot().await,
            }
        }
        .instrument(span)
        .await
    }

    /// Applies one transition under the session lock.
    ///
    /// `ResetDraft` runs inside the same critical section as the state change;
    /// every other action is returned for execution outside the lock.
    async fn apply(&self, event: WizardEvent) -> (WizardSnapshot, Vec<WizardAction>) {
        let event_name = event_name(&event);
        let (snapshot, actions) = {
            let mut session = self.context.lock().await;
            let from = session.state.step;
            let current = std::mem::take(&mut session.state);
            let (next, actions) =
                WizardStateMachine::transition(current, event, session.store.get(), self.policy);
            info!(
                from = ?from,
                to = ?next.step,
                submission = ?next.submission,
                event = event_name,
                "wizard state transition"
            );
            session.state = next;

            let mut remaining = Vec::with_capacity(actions.len());
            for action in actions {
                match action {
                    WizardAction::ResetDraft => {
                        session.store.reset();
                        debug!("wizard draft cleared");
                    }
                    other => remaining.push(other),
                }
            }
            (session.snapshot(), remaining)
        };

        self.events.emit_state_changed(snapshot.clone()).await;
        (snapshot, actions)
    }

    async fn execute_actions(&self, actions: Vec<WizardAction>) -> Vec<WizardEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            match action {
                WizardAction::AdvanceBlocked { step, fields } => {
                    info!(step = ?step, missing = fields.len(), "wizard advance blocked");
                    self.events.emit_advance_blocked(step, fields).await;
                }
                WizardAction::CheckDuplicate { record } => {
                    match self.check_duplicate.execute(&record.email).await {
                        Ok(existing) if existing.is_empty() => {
                            follow_up_events.push(WizardEvent::DuplicateCheckPassed { record });
                        }
                        Ok(existing) => {
                            info!(matches = existing.len(), "email already registered");
                            follow_up_events.push(WizardEvent::DuplicateEmailDetected);
                        }
                        Err(err) => {
                            warn!(error = %err, "duplicate check failed");
                            follow_up_events.push(WizardEvent::DuplicateCheckUnavailable);
                        }
                    }
                }
                WizardAction::InsertRegistration { record } => {
                    match self.save_registration.execute(&record).await {
                        Ok(()) => follow_up_events.push(WizardEvent::InsertSucceeded { record }),
                        Err(err) => {
                            warn!(error = %err, registration_id = %record.id, "registration insert failed");
                            follow_up_events.push(WizardEvent::InsertFailed);
                        }
                    }
                }
                WizardAction::SendConfirmation { email, full_name } => {
                    match &self.send_confirmation {
                        Some(send) => {
                            send.spawn(email, full_name);
                        }
                        None => debug!("confirmation disabled, skipping"),
                    }
                }
                WizardAction::ResetDraft => {
                    // Handled in `apply` while the session lock is held.
                }
            }
        }
        follow_up_events
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.clock.now_ms())
            .single()
            .unwrap_or_else(Utc::now)
    }
}

fn event_name(event: &WizardEvent) -> &'static str {
    match event {
        WizardEvent::Advance => "advance",
        WizardEvent::Retreat => "retreat",
        WizardEvent::Submit { .. } => "submit",
        WizardEvent::Restart => "restart",
        WizardEvent::DuplicateCheckUnavailable => "duplicate_check_unavailable",
        WizardEvent::DuplicateEmailDetected => "duplicate_email_detected",
        WizardEvent::DuplicateCheckPassed { .. } => "duplicate_check_passed",
        WizardEvent::InsertFailed => "insert_failed",
        WizardEvent::InsertSucceeded { .. } => "insert_succeeded",
    }
}
