#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident report data model: categories, urgency levels, media types,
//! and evidence attachments.
//!
//! These are the plain types shared by the submission pipeline, the REST
//! client, and the terminal surface. The wire strings produced by the
//! `Display`/`Serialize` impls are exactly what the backend expects in the
//! multipart submission form.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Maximum number of evidence files attached to a single report.
pub const MAX_EVIDENCE_FILES: usize = 3;

/// Maximum size of a single evidence file, in bytes (10 MiB, inclusive).
pub const MAX_EVIDENCE_BYTES: u64 = 10 * 1024 * 1024;

/// Minimum description length, in characters (inclusive).
pub const DESCRIPTION_MIN_CHARS: usize = 100;

/// Maximum description length, in characters (inclusive).
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Date format used for the `date` submission field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format used for the `time` submission field.
pub const TIME_FORMAT: &str = "%H:%M";

/// Incident category selected by the reporter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IncidentCategory {
    /// Scams, phishing, financial fraud
    Fraud,
    /// Floods, earthquakes, storms, landslides
    NaturalDisaster,
    /// Fires and explosions
    Fire,
    /// Medical emergencies
    Medical,
    /// Suspicious activity
    Suspicious,
    /// Anything else; the reporter names it in free text
    Other,
}

impl IncidentCategory {
    /// Human-readable label shown in selection prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fraud => "Fraud",
            Self::NaturalDisaster => "Natural Disaster",
            Self::Fire => "Fire",
            Self::Medical => "Medical Emergency",
            Self::Suspicious => "Suspicious Activity",
            Self::Other => "Other",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fraud,
            Self::NaturalDisaster,
            Self::Fire,
            Self::Medical,
            Self::Suspicious,
            Self::Other,
        ]
    }
}

/// Urgency selected by the reporter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UrgencyLevel {
    /// No immediate danger
    Low,
    /// Needs attention soon
    Medium,
    /// Immediate danger
    High,
}

impl UrgencyLevel {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Media types accepted as evidence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum MediaType {
    /// JPEG image
    #[serde(rename = "image/jpeg")]
    #[strum(serialize = "image/jpeg")]
    Jpeg,
    /// PNG image
    #[serde(rename = "image/png")]
    #[strum(serialize = "image/png")]
    Png,
    /// MP4 video
    #[serde(rename = "video/mp4")]
    #[strum(serialize = "video/mp4")]
    Mp4,
}

impl MediaType {
    /// Returns the MIME string for this media type.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Mp4 => "video/mp4",
        }
    }

    /// Parses a declared MIME type. Anything outside the accepted set
    /// returns `None`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        mime.parse().ok()
    }

    /// Guesses the media type from a file extension (without the dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }
}

/// A file offered by the file picker, before any checks.
///
/// The declared media type and size come from the picker and are not
/// trusted until the file passes through the evidence filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// File name, used for the multipart part and rejection messages.
    pub name: String,
    /// Declared MIME type, e.g. `"image/png"`.
    pub declared_type: String,
    /// Declared size in bytes.
    pub size: u64,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    /// Creates a candidate whose declared size is the length of `bytes`.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

/// An admitted evidence file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceFile {
    /// Original file name.
    pub name: String,
    /// Verified media type.
    pub media_type: MediaType,
    /// Size in bytes.
    pub size: u64,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Where the incident happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// PIN / postal code.
    pub pincode: String,
    /// City or district.
    pub city: String,
    /// Exact location or nearby landmark.
    pub address: String,
}

/// When the incident happened. Both parts are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurredAt {
    /// Calendar date.
    pub date: Option<NaiveDate>,
    /// Local time of day.
    pub time: Option<NaiveTime>,
}

impl OccurredAt {
    /// Formats the date as `YYYY-MM-DD`, or an empty string when unset.
    #[must_use]
    pub fn date_field(&self) -> String {
        self.date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Formats the time as `HH:MM`, or an empty string when unset.
    #[must_use]
    pub fn time_field(&self) -> String {
        self.time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}
