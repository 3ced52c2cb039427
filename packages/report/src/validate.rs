//! Pre-submission checks.
//!
//! Checks run in a fixed order and stop at the first violation: required
//! fields (category, pincode, description, urgency), then description
//! length, then consent.

use emergency_alert_report_models::{
    DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, IncidentCategory, UrgencyLevel,
};
use strum_macros::{AsRefStr, Display};

use crate::{IncidentReport, ValidationError};

/// Fields that must be filled in before submitting, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RequiredField {
    /// Incident category
    Category,
    /// PIN / postal code
    Pincode,
    /// Incident description
    Description,
    /// Urgency level
    Urgency,
}

/// Which description bound was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DescriptionBound {
    /// Fewer than the minimum number of characters.
    #[strum(serialize = "too short")]
    TooShort,
    /// More than the maximum number of characters.
    #[strum(serialize = "too long")]
    TooLong,
}

/// A report that passed [`validate_for_submit`].
///
/// Only a validated report can be turned into a submission payload. The
/// required enum fields are unwrapped here so serialization never has to
/// deal with a missing category or urgency.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedReport<'a> {
    report: &'a IncidentReport,
    category: IncidentCategory,
    urgency: UrgencyLevel,
}

impl<'a> ValidatedReport<'a> {
    /// The underlying report.
    #[must_use]
    pub const fn report(&self) -> &'a IncidentReport {
        self.report
    }

    /// The selected category.
    #[must_use]
    pub const fn category(&self) -> IncidentCategory {
        self.category
    }

    /// The selected urgency.
    #[must_use]
    pub const fn urgency(&self) -> UrgencyLevel {
        self.urgency
    }
}

/// Validates `report` for submission.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered:
///
/// * [`ValidationError::MissingField`] for the first empty required field,
///   in the order category, pincode, description, urgency
/// * [`ValidationError::DescriptionOutOfBounds`] if the description is
///   outside 100..=1000 characters
/// * [`ValidationError::ConsentNotGiven`] if consent was not confirmed
pub fn validate_for_submit(report: &IncidentReport) -> Result<ValidatedReport<'_>, ValidationError> {
    let category = report
        .category
        .ok_or(ValidationError::MissingField(RequiredField::Category))?;
    if report.location.pincode.is_empty() {
        return Err(ValidationError::MissingField(RequiredField::Pincode));
    }
    if report.description.is_empty() {
        return Err(ValidationError::MissingField(RequiredField::Description));
    }
    let urgency = report
        .urgency
        .ok_or(ValidationError::MissingField(RequiredField::Urgency))?;

    let length = report.description_len();
    let bound = if length < DESCRIPTION_MIN_CHARS {
        Some(DescriptionBound::TooShort)
    } else if length > DESCRIPTION_MAX_CHARS {
        Some(DescriptionBound::TooLong)
    } else {
        None
    };
    if let Some(bound) = bound {
        return Err(ValidationError::DescriptionOutOfBounds {
            bound,
            length,
            min: DESCRIPTION_MIN_CHARS,
            max: DESCRIPTION_MAX_CHARS,
        });
    }

    if !report.consent_confirmed {
        return Err(ValidationError::ConsentNotGiven);
    }

    Ok(ValidatedReport {
        report,
        category,
        urgency,
    })
}

#[cfg(test)]
mod tests {
    use emergency_alert_report_models::Location;

    use super::*;

    fn valid_report() -> IncidentReport {
        IncidentReport {
            category: Some(IncidentCategory::Fraud),
            location: Location {
                pincode: "10001".to_string(),
                city: "New Delhi".to_string(),
                address: "Near the metro station".to_string(),
            },
            description: "d".repeat(100),
            urgency: Some(UrgencyLevel::Low),
            consent_confirmed: true,
            ..IncidentReport::default()
        }
    }

    #[test]
    fn valid_report_passes() {
        let report = valid_report();
        let validated = validate_for_submit(&report).unwrap();
        assert_eq!(validated.category(), IncidentCategory::Fraud);
        assert_eq!(validated.urgency(), UrgencyLevel::Low);
    }

    #[test]
    fn empty_report_names_category_first() {
        assert_eq!(
            validate_for_submit(&IncidentReport::default()).unwrap_err(),
            ValidationError::MissingField(RequiredField::Category)
        );
    }

    #[test]
    fn missing_fields_reported_in_fixed_order() {
        let mut report = valid_report();
        report.location.pincode.clear();
        report.description.clear();
        report.urgency = None;
        assert_eq!(
            validate_for_submit(&report).unwrap_err(),
            ValidationError::MissingField(RequiredField::Pincode)
        );

        report.location.pincode = "10001".to_string();
        assert_eq!(
            validate_for_submit(&report).unwrap_err(),
            ValidationError::MissingField(RequiredField::Description)
        );

        report.description = "d".repeat(100);
        assert_eq!(
            validate_for_submit(&report).unwrap_err(),
            ValidationError::MissingField(RequiredField::Urgency)
        );
    }

    #[test]
    fn missing_field_wins_over_consent() {
        let mut report = valid_report();
        report.urgency = None;
        report.consent_confirmed = false;
        assert_eq!(
            validate_for_submit(&report).unwrap_err(),
            ValidationError::MissingField(RequiredField::Urgency)
        );
    }

    #[test]
    fn description_bounds_are_inclusive() {
        let mut report = valid_report();
        for (len, expected) in [
            (99, Some(DescriptionBound::TooShort)),
            (100, None),
            (1000, None),
            (1001, Some(DescriptionBound::TooLong)),
        ] {
            report.description = "d".repeat(len);
            match (validate_for_submit(&report), expected) {
                (Ok(_), None) => {}
                (
                    Err(ValidationError::DescriptionOutOfBounds { bound, length, .. }),
                    Some(want),
                ) => {
                    assert_eq!(bound, want);
                    assert_eq!(length, len);
                }
                (other, _) => panic!("length {len}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn short_description_fails_before_other_category_matters() {
        let mut report = valid_report();
        report.category = Some(IncidentCategory::Other);
        report.other_category = "landslide".to_string();
        report.description = "d".repeat(50);
        assert!(matches!(
            validate_for_submit(&report).unwrap_err(),
            ValidationError::DescriptionOutOfBounds {
                bound: DescriptionBound::TooShort,
                length: 50,
                ..
            }
        ));
    }

    #[test]
    fn consent_required() {
        let mut report = valid_report();
        report.consent_confirmed = false;
        assert_eq!(
            validate_for_submit(&report).unwrap_err(),
            ValidationError::ConsentNotGiven
        );
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            ValidationError::MissingField(RequiredField::Pincode).to_string(),
            "Please fill in all required fields (missing pincode)"
        );
        let mut report = valid_report();
        report.description = "d".repeat(20);
        assert_eq!(
            validate_for_submit(&report).unwrap_err().to_string(),
            "Description must be between 100 and 1000 characters (too short: 20)"
        );
    }
}
