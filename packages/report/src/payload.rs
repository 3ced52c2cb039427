//! Multipart payload assembly.
//!
//! [`build_submission_payload`] produces a transport-neutral, ordered list
//! of form parts. The HTTP client converts it into an actual multipart
//! body; keeping the field list as plain data lets the exact field set be
//! inspected and tested without a network stack.

use emergency_alert_report_models::MediaType;

use crate::validate::ValidatedReport;

/// Placeholder coordinate sent until geolocation is wired up.
pub const PLACEHOLDER_COORDINATE: &str = "0.0";

/// One part of the multipart submission body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    /// A plain text field.
    Text {
        /// Form field name.
        name: &'static str,
        /// Field value.
        value: String,
    },
    /// A binary file field.
    File {
        /// Form field name (always `files`).
        name: &'static str,
        /// Original file name.
        file_name: String,
        /// Content type of the part.
        media_type: MediaType,
        /// File contents.
        bytes: Vec<u8>,
    },
}

impl PayloadPart {
    /// Form field name of this part.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }

    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::Text {
            name,
            value: value.into(),
        }
    }
}

/// The ordered field list of one incident submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    parts: Vec<PayloadPart>,
}

impl SubmissionPayload {
    /// All parts, in send order.
    #[must_use]
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    /// Consumes the payload, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    /// Field names in send order (file fields repeat).
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.parts.iter().map(PayloadPart::name).collect()
    }

    /// Value of the first text field called `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            PayloadPart::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Number of file parts.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, PayloadPart::File { .. }))
            .count()
    }
}

/// Builds the multipart field list for a validated report.
///
/// Text fields are emitted in a fixed order: `category`, `pincode`,
/// `address`, `city`, `date`, `time`, `description`, `urgency_level`,
/// `latitude`, `longitude`, then `other_category` (only for the `other`
/// category with a non-empty name), then `is_verified`. Each evidence file
/// follows as a `files` part. When any evidence is attached, the captions
/// are sent last as one `file_captions` field holding a JSON array of
/// strings aligned with the `files` parts.
#[must_use]
pub fn build_submission_payload(validated: &ValidatedReport<'_>) -> SubmissionPayload {
    let report = validated.report();
    let mut parts = vec![
        PayloadPart::text("category", validated.category().as_ref()),
        PayloadPart::text("pincode", report.location.pincode.as_str()),
        PayloadPart::text("address", report.location.address.as_str()),
        PayloadPart::text("city", report.location.city.as_str()),
        PayloadPart::text("date", report.occurred_at.date_field()),
        PayloadPart::text("time", report.occurred_at.time_field()),
        PayloadPart::text("description", report.description.as_str()),
        PayloadPart::text("urgency_level", validated.urgency().as_ref()),
        PayloadPart::text("latitude", PLACEHOLDER_COORDINATE),
        PayloadPart::text("longitude", PLACEHOLDER_COORDINATE),
    ];

    if let Some(other) = report.effective_other_category() {
        parts.push(PayloadPart::text("other_category", other));
    }

    parts.push(PayloadPart::text(
        "is_verified",
        report.consent_confirmed.to_string(),
    ));

    for file in report.evidence.files() {
        parts.push(PayloadPart::File {
            name: "files",
            file_name: file.name.clone(),
            media_type: file.media_type,
            bytes: file.bytes.clone(),
        });
    }

    let captions = report.evidence.captions();
    if !captions.is_empty() {
        parts.push(PayloadPart::text(
            "file_captions",
            serde_json::Value::from(captions.to_vec()).to_string(),
        ));
    }

    log::debug!(
        "Built submission payload: {} field(s), {} file(s)",
        parts.len(),
        report.evidence.len()
    );

    SubmissionPayload { parts }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use emergency_alert_report_models::{
        CandidateFile, IncidentCategory, Location, OccurredAt, UrgencyLevel,
    };

    use super::*;
    use crate::{IncidentReport, attach_files, validate_for_submit};

    fn valid_report() -> IncidentReport {
        IncidentReport {
            category: Some(IncidentCategory::Fraud),
            location: Location {
                pincode: "10001".to_string(),
                city: "Mumbai".to_string(),
                address: "Opposite the bus depot".to_string(),
            },
            description: "d".repeat(100),
            urgency: Some(UrgencyLevel::Low),
            consent_confirmed: true,
            ..IncidentReport::default()
        }
    }

    fn build(report: &IncidentReport) -> SubmissionPayload {
        build_submission_payload(&validate_for_submit(report).unwrap())
    }

    #[test]
    fn minimal_report_field_set() {
        let payload = build(&valid_report());
        assert_eq!(
            payload.field_names(),
            [
                "category",
                "pincode",
                "address",
                "city",
                "date",
                "time",
                "description",
                "urgency_level",
                "latitude",
                "longitude",
                "is_verified",
            ]
        );
        assert_eq!(payload.text("category"), Some("fraud"));
        assert_eq!(payload.text("urgency_level"), Some("low"));
        assert_eq!(payload.text("latitude"), Some("0.0"));
        assert_eq!(payload.text("longitude"), Some("0.0"));
        assert_eq!(payload.text("date"), Some(""));
        assert_eq!(payload.text("other_category"), None);
        assert_eq!(payload.text("file_captions"), None);
        assert_eq!(payload.file_count(), 0);
    }

    #[test]
    fn other_category_included_only_when_named() {
        let mut report = valid_report();
        report.category = Some(IncidentCategory::Other);
        assert_eq!(build(&report).text("other_category"), None);

        report.other_category = "landslide".to_string();
        let payload = build(&report);
        assert_eq!(payload.text("category"), Some("other"));
        assert_eq!(payload.text("other_category"), Some("landslide"));

        report.category = Some(IncidentCategory::NaturalDisaster);
        assert_eq!(build(&report).text("other_category"), None);
    }

    #[test]
    fn date_and_time_formatted() {
        let mut report = valid_report();
        report.occurred_at = OccurredAt {
            date: NaiveDate::from_ymd_opt(2025, 1, 31),
            time: NaiveTime::from_hms_opt(18, 45, 0),
        };
        let payload = build(&report);
        assert_eq!(payload.text("date"), Some("2025-01-31"));
        assert_eq!(payload.text("time"), Some("18:45"));
    }

    #[test]
    fn files_and_aligned_captions() {
        let mut report = valid_report();
        attach_files(
            &mut report.evidence,
            vec![
                CandidateFile::new("one.jpg", "image/jpeg", vec![1, 2, 3]),
                CandidateFile::new("two.mp4", "video/mp4", vec![4, 5]),
            ],
        )
        .unwrap();
        report.evidence.set_caption(1, "street view").unwrap();

        let payload = build(&report);
        let names = payload.field_names();
        assert_eq!(&names[names.len() - 3..], ["files", "files", "file_captions"]);
        assert_eq!(payload.file_count(), 2);
        assert_eq!(payload.text("file_captions"), Some(r#"["","street view"]"#));

        let files: Vec<(&str, MediaType)> = payload
            .parts()
            .iter()
            .filter_map(|part| match part {
                PayloadPart::File {
                    file_name,
                    media_type,
                    ..
                } => Some((file_name.as_str(), *media_type)),
                PayloadPart::Text { .. } => None,
            })
            .collect();
        assert_eq!(files, [("one.jpg", MediaType::Jpeg), ("two.mp4", MediaType::Mp4)]);
    }

    #[test]
    fn payload_is_deterministic() {
        let report = valid_report();
        assert_eq!(build(&report), build(&report));
    }
}
