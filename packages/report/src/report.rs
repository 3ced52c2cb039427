//! The in-memory incident report.

use emergency_alert_report_models::{IncidentCategory, Location, OccurredAt, UrgencyLevel};

use crate::evidence::EvidenceList;

/// An incident report as it is being filled in.
///
/// Every field starts empty; nothing here is checked until
/// [`crate::validate_for_submit`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentReport {
    /// Selected category, if any.
    pub category: Option<IncidentCategory>,
    /// Free-text category name, used when `category` is
    /// [`IncidentCategory::Other`].
    pub other_category: String,
    /// Where it happened.
    pub location: Location,
    /// When it happened.
    pub occurred_at: OccurredAt,
    /// What happened.
    pub description: String,
    /// Selected urgency, if any.
    pub urgency: Option<UrgencyLevel>,
    /// The reporter confirmed the information is accurate.
    pub consent_confirmed: bool,
    /// Attached evidence with captions.
    pub evidence: EvidenceList,
}

impl IncidentReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Description length in characters.
    #[must_use]
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }

    /// The free-text category, when it should be sent: only for
    /// [`IncidentCategory::Other`] and only when non-empty.
    #[must_use]
    pub fn effective_other_category(&self) -> Option<&str> {
        match self.category {
            Some(IncidentCategory::Other) if !self.other_category.is_empty() => {
                Some(&self.other_category)
            }
            _ => None,
        }
    }
}
