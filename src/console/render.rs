//! Text layouts for wizard snapshots.

use std::fmt::Write as _;
use std::str::FromStr;

use rw_core::wizard::WizardSnapshot;
use rw_core::{DraftField, EventSlot, SubmissionOutcome, WizardStep};

const SUCCESS_MESSAGE: &str = "Thank you! Your registration has been received.";

/// Turns snapshots into printable text.
pub trait SnapshotRenderer: Send + Sync {
    fn render(&self, snapshot: &WizardSnapshot) -> String;

    fn render_blocked(&self, step: WizardStep, fields: &[DraftField]) -> String {
        let names: Vec<&str> = fields.iter().map(|f| field_label(*f)).collect();
        format!("Cannot leave {}: {}", step.title(), names.join(", "))
    }
}

/// Layout names accepted by `--layout` and `general.layout`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ConsoleLayout {
    #[default]
    Wide,
    Compact,
}

impl ConsoleLayout {
    pub fn renderer(self) -> Box<dyn SnapshotRenderer> {
        match self {
            ConsoleLayout::Wide => Box::new(WideLayout),
            ConsoleLayout::Compact => Box::new(CompactLayout),
        }
    }
}

impl FromStr for ConsoleLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "wide" => Ok(ConsoleLayout::Wide),
            "compact" => Ok(ConsoleLayout::Compact),
            other => Err(format!("unknown layout: {other}")),
        }
    }
}

pub fn field_label(field: DraftField) -> &'static str {
    match field {
        DraftField::SelectedEvents => "Events",
        DraftField::Email => "Email",
        DraftField::FullName => "Full name",
        DraftField::ContactNumber => "Contact number",
        DraftField::Address => "Address",
        DraftField::Company => "Company/Affiliation",
        DraftField::Designation => "Designation",
        DraftField::FirstTimeAttendee => "First time attending",
    }
}

fn field_value(snapshot: &WizardSnapshot, field: DraftField) -> String {
    match field {
        DraftField::SelectedEvents => snapshot.selection_summary.clone(),
        DraftField::FirstTimeAttendee => snapshot.draft.first_time_attendee.as_str().to_string(),
        text => snapshot.draft.text(text).unwrap_or_default().to_string(),
    }
}

fn status_line(submission: SubmissionOutcome) -> Option<&'static str> {
    match submission {
        SubmissionOutcome::NotAttempted => None,
        SubmissionOutcome::InFlight => Some("Submitting..."),
        SubmissionOutcome::Succeeded => Some(SUCCESS_MESSAGE),
        SubmissionOutcome::Failed(_) => None,
    }
}

/// Multi-line form view: step tracker, every field of the current step with
/// its inline error, then any notice.
pub struct WideLayout;

impl SnapshotRenderer for WideLayout {
    fn render(&self, snapshot: &WizardSnapshot) -> String {
        let mut out = String::new();

        if snapshot.is_completed() {
            let _ = writeln!(out, "==== Registration complete ====");
            let _ = writeln!(out, "{SUCCESS_MESSAGE}");
            let _ = write!(out, "Type `restart` to register someone else.");
            return out;
        }

        let tracker: Vec<String> = WizardStep::ALL
            .iter()
            .map(|step| {
                if *step == snapshot.step {
                    format!("[{}. {}]", step.number(), step.title())
                } else {
                    format!(" {}. {} ", step.number(), step.title())
                }
            })
            .collect();
        let _ = writeln!(out, "{}", tracker.join(" > "));

        if snapshot.step == WizardStep::EventSelection {
            for slot in EventSlot::ALL {
                let mark = if snapshot.draft.selected_events.contains(&slot) {
                    "x"
                } else {
                    " "
                };
                let _ = writeln!(out, "  [{mark}] {}  {}", slot.as_str(), slot.label());
            }
        }

        for field in snapshot.step.fields() {
            let _ = writeln!(
                out,
                "  {:<22} {}",
                format!("{}:", field_label(*field)),
                field_value(snapshot, *field)
            );
            if let Some(message) = snapshot.errors.get(*field) {
                let _ = writeln!(out, "  {:<22} ! {message}", "");
            }
        }

        if let Some(notice) = &snapshot.notice {
            let _ = writeln!(out, "  ** {}", notice.message());
        }
        if let Some(status) = status_line(snapshot.submission) {
            let _ = writeln!(out, "  {status}");
        }
        if snapshot.submit_enabled() {
            let _ = writeln!(out, "  (type `submit` to register)");
        }

        out.trim_end().to_string()
    }
}

/// One line per snapshot, for narrow terminals and log-like output.
pub struct CompactLayout;

impl SnapshotRenderer for CompactLayout {
    fn render(&self, snapshot: &WizardSnapshot) -> String {
        if snapshot.is_completed() {
            return format!("done | {SUCCESS_MESSAGE}");
        }

        let mut parts = vec![format!("step {}", snapshot.step)];
        if !snapshot.errors.is_empty() {
            let missing: Vec<&str> = snapshot.errors.fields().map(|f| f.as_str()).collect();
            parts.push(format!("invalid: {}", missing.join(",")));
        }
        if let Some(notice) = &snapshot.notice {
            parts.push(notice.message().to_string());
        }
        if let Some(status) = status_line(snapshot.submission) {
            parts.push(status.to_string());
        }
        parts.join(" | ")
    }

    fn render_blocked(&self, step: WizardStep, fields: &[DraftField]) -> String {
        let names: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();
        format!("blocked {} | {}", step.number(), names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_core::wizard::{WizardNotice, WizardState};
    use rw_core::{RegistrationDraft, SubmissionFailure};

    fn snapshot_at(step: WizardStep) -> (RegistrationDraft, WizardState) {
        let state = WizardState {
            step,
            ..WizardState::default()
        };
        (RegistrationDraft::default(), state)
    }

    #[test]
    fn wide_layout_marks_current_step_and_selected_events() {
        let (mut draft, state) = snapshot_at(WizardStep::EventSelection);
        draft.selected_events.insert(EventSlot::Event2);

        let text = WideLayout.render(&WizardSnapshot::new(&draft, &state));

        assert!(text.contains("[1. Event Selection]"));
        assert!(text.contains("[ ] event1"));
        assert!(text.contains("[x] event2"));
        assert!(text.contains("September 3, 2025"));
    }

    #[test]
    fn wide_layout_shows_inline_errors_and_notice() {
        let (draft, mut state) = snapshot_at(WizardStep::PersonalInfo);
        state.errors.insert(DraftField::Email, "This email is already registered.");
        state.notice = Some(WizardNotice::CheckUnavailable);
        state.submission = SubmissionOutcome::Failed(SubmissionFailure::CheckUnavailable);

        let text = WideLayout.render(&WizardSnapshot::new(&draft, &state));

        assert!(text.contains("! This email is already registered."));
        assert!(text.contains("Error checking existing registration."));
        assert!(!text.contains("type `submit`"));
    }

    #[test]
    fn success_view_replaces_the_form() {
        let (draft, mut state) = snapshot_at(WizardStep::EventSelection);
        state.submission = SubmissionOutcome::Succeeded;
        let snapshot = WizardSnapshot::new(&draft, &state);

        assert!(WideLayout.render(&snapshot).contains(SUCCESS_MESSAGE));
        assert!(!WideLayout.render(&snapshot).contains("Event Selection"));
        assert!(CompactLayout.render(&snapshot).starts_with("done"));
    }

    #[test]
    fn compact_layout_is_single_line() {
        let (draft, mut state) = snapshot_at(WizardStep::Affiliation);
        state.errors.insert(DraftField::Company, "Company/Affiliation is required");
        state.submission = SubmissionOutcome::InFlight;

        let text = CompactLayout.render(&WizardSnapshot::new(&draft, &state));

        assert_eq!(text, "step 3/3 Affiliation | invalid: company | Submitting...");
        assert_eq!(
            CompactLayout.render_blocked(WizardStep::PersonalInfo, &[DraftField::FullName]),
            "blocked 2 | fullName"
        );
    }

    #[test]
    fn layout_names_parse() {
        assert_eq!("Compact".parse::<ConsoleLayout>(), Ok(ConsoleLayout::Compact));
        assert_eq!("".parse::<ConsoleLayout>(), Ok(ConsoleLayout::Wide));
        assert!("tabular".parse::<ConsoleLayout>().is_err());
    }
}
