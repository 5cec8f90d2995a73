use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::registration::DraftField;

/// Wizard steps in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    EventSelection,
    PersonalInfo,
    Affiliation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::EventSelection,
        WizardStep::PersonalInfo,
        WizardStep::Affiliation,
    ];
    pub const FIRST: WizardStep = WizardStep::EventSelection;
    pub const LAST: WizardStep = WizardStep::Affiliation;

    /// 1-based position.
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    fn index(&self) -> usize {
        match self {
            WizardStep::EventSelection => 0,
            WizardStep::PersonalInfo => 1,
            WizardStep::Affiliation => 2,
        }
    }

    /// Next step, clamped at the last one.
    pub fn next(self) -> WizardStep {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Self::LAST)
    }

    /// Previous step, clamped at the first one.
    pub fn previous(self) -> WizardStep {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::FIRST)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::EventSelection => "Event Selection",
            WizardStep::PersonalInfo => "Personal Information",
            WizardStep::Affiliation => "Affiliation",
        }
    }

    /// Fields the user fills in on this step.
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            WizardStep::EventSelection => &[DraftField::SelectedEvents],
            WizardStep::PersonalInfo => &[
                DraftField::Email,
                DraftField::FullName,
                DraftField::ContactNumber,
            ],
            WizardStep::Affiliation => &[
                DraftField::Address,
                DraftField::Company,
                DraftField::Designation,
                DraftField::FirstTimeAttendee,
            ],
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} {}", self.number(), Self::ALL.len(), self.title())
    }
}
