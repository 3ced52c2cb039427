#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types for the emergency alert REST API.
//!
//! Field names follow the backend's JSON: the submission receipt and the
//! alert records are `snake_case`, the admin dashboard endpoints are
//! `camelCase`. Timestamps are naive (the backend writes UTC without an
//! offset).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Acknowledgment returned after an incident report is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Human-readable confirmation.
    pub message: String,
    /// Id of the record in the primary (historical) store.
    pub postgresql_id: i64,
    /// Id of the record in the real-time store.
    pub firebase_id: String,
    /// Status the alert was created with.
    #[serde(default)]
    pub status: String,
    /// Server timestamp (ISO 8601).
    #[serde(default)]
    pub timestamp: String,
}

/// Error body returned by the backend for non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Error detail.
    pub detail: String,
}

/// Generic `{"message": ...}` acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// A stored alert from the historical feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Primary key.
    pub id: i64,
    /// Alert type (fire, flood, fraud, ...).
    pub alert_type: String,
    /// Severity (low, medium, high, critical).
    pub severity: String,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Place name.
    pub location_name: Option<String>,
    /// Affected radius in km.
    pub radius: Option<f64>,
    /// Status (active, resolved, archived).
    pub status: String,
    /// Whether the alert is currently active.
    pub is_active: bool,
    /// Creation time.
    pub created_at: NaiveDateTime,
    /// Resolution time, if resolved.
    pub resolved_at: Option<NaiveDateTime>,
}

/// An alert from the real-time feed.
///
/// Records are written by the submission endpoint, so most fields mirror
/// the submitted form. All of them are optional because the store is
/// schemaless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeAlert {
    /// Store key.
    pub id: Option<String>,
    /// Alert type.
    pub alert_type: Option<String>,
    /// Severity.
    pub severity: Option<String>,
    /// Short title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Place name.
    pub location_name: Option<String>,
    /// PIN / postal code.
    pub pincode: Option<String>,
    /// Incident date as submitted.
    pub incident_date: Option<String>,
    /// Incident time as submitted.
    pub incident_time: Option<String>,
    /// Urgency as submitted.
    pub urgency_level: Option<String>,
    /// Write time (ISO 8601).
    pub timestamp: Option<String>,
    /// Status.
    pub status: Option<String>,
}

/// The real-time feed returns either an empty list or a map keyed by
/// alert id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RealtimeAlertSet {
    /// List form.
    List(Vec<RealtimeAlert>),
    /// Keyed form.
    Keyed(BTreeMap<String, RealtimeAlert>),
}

impl Default for RealtimeAlertSet {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl RealtimeAlertSet {
    /// Flattens the set into a list, filling in missing ids from the map
    /// keys.
    #[must_use]
    pub fn into_vec(self) -> Vec<RealtimeAlert> {
        match self {
            Self::List(alerts) => alerts,
            Self::Keyed(map) => map
                .into_iter()
                .map(|(key, mut alert)| {
                    if alert.id.is_none() {
                        alert.id = Some(key);
                    }
                    alert
                })
                .collect(),
        }
    }
}

/// Envelope of the real-time feed endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeAlerts {
    /// The alerts.
    #[serde(default)]
    pub alerts: RealtimeAlertSet,
}

/// Dashboard overview counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    /// Alerts created today.
    pub total_alerts_today: u64,
    /// Crime alerts created today.
    pub crime_alerts: u64,
    /// Fraud alerts created today.
    pub fraud_alerts: u64,
    /// Weather, flood, and storm alerts created today.
    pub weather_alerts: u64,
    /// Active police and NGO users.
    pub active_responders: u64,
    /// Average response time in minutes.
    pub avg_response_time: f64,
}

/// An alert row in the admin alert table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAlert {
    /// Primary key.
    pub id: i64,
    /// Alert type.
    #[serde(rename = "type")]
    pub alert_type: String,
    /// Short title.
    pub title: String,
    /// Place name (`"Unknown"` when missing).
    pub location: String,
    /// Severity.
    pub severity: String,
    /// Status.
    pub status: String,
    /// Creation time.
    pub reported_on: NaiveDateTime,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Description.
    pub description: Option<String>,
}

/// One page of admin alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPage {
    /// Alerts on this page, newest first.
    pub data: Vec<AdminAlert>,
    /// Total matching alerts.
    pub total: u64,
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
}

/// Filters for the admin alert table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertQuery {
    /// Substring match on alert type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
    /// Exact severity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Exact status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Rows to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A labeled count in a chart breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    /// Group label; `None` for rows with no value.
    pub name: Option<String>,
    /// Number of alerts in the group.
    pub value: u64,
}

/// Alert breakdowns for the dashboard charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    /// Counts per alert type.
    pub by_type: Vec<NamedCount>,
    /// Counts per severity.
    pub by_severity: Vec<NamedCount>,
    /// Counts per status.
    pub by_status: Vec<NamedCount>,
}

/// A user row in the admin user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    /// Primary key.
    pub id: i64,
    /// Full name, or username when unset.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role string as stored.
    pub role: String,
    /// Phone number.
    pub phone: Option<String>,
    /// `active` or `inactive`.
    pub status: String,
    /// Account creation time.
    pub created_at: NaiveDateTime,
}

/// The admin user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    /// Users.
    pub data: Vec<ManagedUser>,
    /// Total matching users.
    pub total: u64,
}

/// Filters for the admin user table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserQuery {
    /// Exact role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// `active` or `inactive`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Alerts per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Day (`YYYY-MM-DD`).
    pub date: String,
    /// Alerts created that day.
    pub count: u64,
}

/// A location with many alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Place name.
    pub location: String,
    /// Alerts at this place.
    pub incidents: u64,
}

/// Alerts per severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCount {
    /// Severity; `None` for rows with no value.
    pub severity: Option<String>,
    /// Alerts with this severity.
    pub count: u64,
}

/// Forecast figures shown next to the insight charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    /// Expected alerts next week.
    pub next_week_alerts: u64,
    /// Number of high-risk zones.
    pub high_risk_areas: u64,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Insight charts and predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Alerts per day over the last week.
    pub trends: Vec<TrendPoint>,
    /// Top five locations by alert count.
    pub hotspots: Vec<Hotspot>,
    /// Alerts per severity.
    pub severity_distribution: Vec<SeverityCount>,
    /// Forecast figures.
    pub predictions: Predictions,
}

/// A labeled numeric point handed to a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// X-axis or slice label.
    pub label: String,
    /// Value.
    pub value: f64,
}

impl SeriesPoint {
    #[allow(clippy::cast_precision_loss)]
    fn count(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value: value as f64,
        }
    }
}

/// Label used for groups whose key is missing.
pub const UNKNOWN_LABEL: &str = "unknown";

impl Insights {
    /// Daily alert counts as a chart series.
    #[must_use]
    pub fn trend_series(&self) -> Vec<SeriesPoint> {
        self.trends
            .iter()
            .map(|t| SeriesPoint::count(t.date.as_str(), t.count))
            .collect()
    }

    /// Hotspot counts as a chart series.
    #[must_use]
    pub fn hotspot_series(&self) -> Vec<SeriesPoint> {
        self.hotspots
            .iter()
            .map(|h| SeriesPoint::count(h.location.as_str(), h.incidents))
            .collect()
    }

    /// Severity distribution as a chart series.
    #[must_use]
    pub fn severity_series(&self) -> Vec<SeriesPoint> {
        self.severity_distribution
            .iter()
            .map(|s| SeriesPoint::count(s.severity.as_deref().unwrap_or(UNKNOWN_LABEL), s.count))
            .collect()
    }
}

/// Converts a breakdown into a chart series.
#[must_use]
pub fn named_series(counts: &[NamedCount]) -> Vec<SeriesPoint> {
    counts
        .iter()
        .map(|c| SeriesPoint::count(c.name.as_deref().unwrap_or(UNKNOWN_LABEL), c.value))
        .collect()
}

/// An active alert with coordinates, for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAlert {
    /// Primary key.
    pub id: i64,
    /// Alert type.
    #[serde(rename = "type")]
    pub alert_type: String,
    /// Short title.
    pub title: String,
    /// Severity.
    pub severity: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Place name.
    pub location: Option<String>,
    /// Creation time.
    pub timestamp: NaiveDateTime,
}

/// Alerts for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAlerts {
    /// The alerts.
    pub alerts: Vec<MapAlert>,
    /// Number of alerts.
    pub total: u64,
}
