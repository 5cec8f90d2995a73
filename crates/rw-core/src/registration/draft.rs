//! Registration draft.
//!
//! The in-progress record edited through the wizard. It only lives while the
//! wizard is open and is cleared after a confirmed insert.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Event slots offered by the wizard.
///
/// Ordering is the display order, so a `BTreeSet<EventSlot>` renders
/// deterministically regardless of the order the user ticked the boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSlot {
    Event1,
    Event2,
}

impl EventSlot {
    pub const ALL: [EventSlot; 2] = [EventSlot::Event1, EventSlot::Event2];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventSlot::Event1 => "event1",
            EventSlot::Event2 => "event2",
        }
    }

    /// Human readable label shown next to the checkbox.
    pub fn label(&self) -> &'static str {
        match self {
            EventSlot::Event1 => "September 2, 2025 | Bounty Strategic Suppliers Showcase 2025",
            EventSlot::Event2 => "September 3, 2025 | Bounty Strategic Suppliers Showcase 2025",
        }
    }
}

impl Display for EventSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event1" => Ok(EventSlot::Event1),
            "event2" => Ok(EventSlot::Event2),
            other => Err(format!("unknown event slot: {other}")),
        }
    }
}

/// Tri-state answer to "is this your first time attending?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstTimeAttendee {
    #[default]
    Unset,
    Yes,
    No,
}

impl FirstTimeAttendee {
    pub fn is_set(&self) -> bool {
        !matches!(self, FirstTimeAttendee::Unset)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FirstTimeAttendee::Unset => None,
            FirstTimeAttendee::Yes => Some(true),
            FirstTimeAttendee::No => Some(false),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FirstTimeAttendee::Unset => "",
            FirstTimeAttendee::Yes => "yes",
            FirstTimeAttendee::No => "no",
        }
    }
}

impl FromStr for FirstTimeAttendee {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(FirstTimeAttendee::Unset),
            "yes" => Ok(FirstTimeAttendee::Yes),
            "no" => Ok(FirstTimeAttendee::No),
            other => Err(format!("expected yes/no, got {other}")),
        }
    }
}

/// Names of the draft's fields.
///
/// The wire names match the form input names and are used as keys in
/// validation error maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DraftField {
    #[serde(rename = "selectedEvents")]
    SelectedEvents,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "contactNumber")]
    ContactNumber,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "designation")]
    Designation,
    #[serde(rename = "firstTime")]
    FirstTimeAttendee,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::SelectedEvents,
        DraftField::Email,
        DraftField::FullName,
        DraftField::ContactNumber,
        DraftField::Address,
        DraftField::Company,
        DraftField::Designation,
        DraftField::FirstTimeAttendee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::SelectedEvents => "selectedEvents",
            DraftField::Email => "email",
            DraftField::FullName => "fullName",
            DraftField::ContactNumber => "contactNumber",
            DraftField::Address => "address",
            DraftField::Company => "company",
            DraftField::Designation => "designation",
            DraftField::FirstTimeAttendee => "firstTime",
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// In-progress registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub selected_events: BTreeSet<EventSlot>,
    pub email: String,
    pub full_name: String,
    pub contact_number: String,
    pub address: String,
    pub company: String,
    pub designation: String,
    pub first_time_attendee: FirstTimeAttendee,
}

impl RegistrationDraft {
    /// Text value of a free-text field, `None` for the structured ones.
    pub fn text(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::Email => Some(&self.email),
            DraftField::FullName => Some(&self.full_name),
            DraftField::ContactNumber => Some(&self.contact_number),
            DraftField::Address => Some(&self.address),
            DraftField::Company => Some(&self.company),
            DraftField::Designation => Some(&self.designation),
            DraftField::SelectedEvents | DraftField::FirstTimeAttendee => None,
        }
    }

    pub(crate) fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Email => Some(&mut self.email),
            DraftField::FullName => Some(&mut self.full_name),
            DraftField::ContactNumber => Some(&mut self.contact_number),
            DraftField::Address => Some(&mut self.address),
            DraftField::Company => Some(&mut self.company),
            DraftField::Designation => Some(&mut self.designation),
            DraftField::SelectedEvents | DraftField::FirstTimeAttendee => None,
        }
    }

    /// Summary line shown under the event checkboxes.
    pub fn selection_summary(&self) -> String {
        let labels: Vec<&str> = self.selected_events.iter().map(|e| e.label()).collect();
        match labels.as_slice() {
            [] => "Please select at least one event.".to_string(),
            [only] => (*only).to_string(),
            many => {
                let mut summary = String::from("You have selected these events:");
                for label in many {
                    summary.push_str("\n• ");
                    summary.push_str(label);
                }
                summary
            }
        }
    }
}
