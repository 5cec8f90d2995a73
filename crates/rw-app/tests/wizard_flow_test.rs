use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rw_app::{WizardDeps, WizardError, WizardOrchestrator, WizardSettings};
use rw_core::ports::{ClockPort, WizardEventPort};
use rw_core::validation::{MSG_COMPANY_REQUIRED, MSG_SELECT_EVENT};
use rw_core::wizard::WizardSnapshot;
use rw_core::{DraftField, EventSlot, FieldStoreError, ValidationPolicy, WizardStep};
use rw_infra::{InMemoryRegistrationRepository, NoopNotifier};

#[derive(Default)]
struct RecordingEvents {
    snapshots: Mutex<Vec<WizardSnapshot>>,
    blocked: Mutex<Vec<(WizardStep, Vec<DraftField>)>>,
}

#[async_trait]
impl WizardEventPort for RecordingEvents {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }

    async fn emit_advance_blocked(&self, step: WizardStep, fields: Vec<DraftField>) {
        self.blocked.lock().unwrap().push((step, fields));
    }
}

struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        1_756_771_200_000
    }
}

fn orchestrator(events: Arc<RecordingEvents>) -> WizardOrchestrator {
    WizardOrchestrator::new(
        WizardDeps {
            registrations: Arc::new(InMemoryRegistrationRepository::new()),
            notifier: Arc::new(NoopNotifier),
            events,
            clock: Arc::new(FixedClock),
        },
        WizardSettings {
            policy: ValidationPolicy::default(),
            request_timeout: Duration::from_secs(5),
            send_confirmation: false,
        },
    )
}

#[tokio::test]
async fn advance_from_empty_selection_is_blocked() {
    let events = Arc::new(RecordingEvents::default());
    let wizard = orchestrator(Arc::clone(&events));

    let snapshot = wizard.advance().await;

    assert_eq!(snapshot.step, WizardStep::EventSelection);
    assert_eq!(snapshot.errors.get(DraftField::SelectedEvents), Some(MSG_SELECT_EVENT));
    let blocked = events.blocked.lock().unwrap().clone();
    assert_eq!(
        blocked,
        vec![(WizardStep::EventSelection, vec![DraftField::SelectedEvents])]
    );
}

#[tokio::test]
async fn walks_forward_and_back_through_steps() {
    let wizard = orchestrator(Arc::new(RecordingEvents::default()));

    wizard.toggle_event(EventSlot::Event2, true).await.unwrap();
    assert_eq!(wizard.advance().await.step, WizardStep::PersonalInfo);

    wizard.set_field(DraftField::Email, "a@x.com").await.unwrap();
    wizard.set_field(DraftField::FullName, "Ada Lovelace").await.unwrap();
    wizard.set_field(DraftField::ContactNumber, "555-0100").await.unwrap();
    assert_eq!(wizard.advance().await.step, WizardStep::Affiliation);

    let blocked = wizard.advance().await;
    assert_eq!(blocked.step, WizardStep::Affiliation);
    assert_eq!(blocked.errors.get(DraftField::Company), Some(MSG_COMPANY_REQUIRED));

    let back = wizard.retreat().await;
    assert_eq!(back.step, WizardStep::PersonalInfo);
    assert!(back.errors.is_empty());
    assert_eq!(back.draft.full_name, "Ada Lovelace");

    wizard.retreat().await;
    assert_eq!(wizard.retreat().await.step, WizardStep::EventSelection);
}

#[tokio::test]
async fn every_edit_publishes_a_snapshot() {
    let events = Arc::new(RecordingEvents::default());
    let wizard = orchestrator(Arc::clone(&events));

    wizard.toggle_event(EventSlot::Event1, true).await.unwrap();
    wizard.toggle_event(EventSlot::Event1, true).await.unwrap();
    wizard.set_field(DraftField::Company, "Bounty").await.unwrap();

    let snapshots = events.snapshots.lock().unwrap().clone();
    assert_eq!(snapshots.len(), 3);
    let last = snapshots.last().unwrap();
    assert_eq!(last.draft.selected_events.len(), 1);
    assert_eq!(last.draft.company, "Bounty");
    assert!(last.selection_summary.contains("September 2"));
}

#[tokio::test]
async fn selected_events_cannot_be_set_as_text() {
    let wizard = orchestrator(Arc::new(RecordingEvents::default()));

    let err = wizard
        .set_field(DraftField::SelectedEvents, "event1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WizardError::Field(FieldStoreError::NotATextField(DraftField::SelectedEvents))
    ));
}

#[tokio::test]
async fn submit_is_ignored_before_the_last_step() {
    let wizard = orchestrator(Arc::new(RecordingEvents::default()));
    wizard.toggle_event(EventSlot::Event1, true).await.unwrap();

    let snapshot = wizard.submit().await;

    assert_eq!(snapshot.step, WizardStep::EventSelection);
    assert_eq!(snapshot.submission, Default::default());
}
