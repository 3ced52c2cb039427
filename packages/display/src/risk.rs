//! Risk map points and marker styling.

use std::collections::BTreeMap;

use emergency_alert_client_models::MapAlert;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Area name used for map alerts without a location.
pub const UNKNOWN_AREA: &str = "Unknown area";

/// Risk band of a score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum RiskLevel {
    #[strum(serialize = "Low")]
    Low,
    #[strum(serialize = "Low-Medium")]
    LowMedium,
    #[strum(serialize = "Medium")]
    Medium,
    #[strum(serialize = "High")]
    High,
}

impl RiskLevel {
    /// Bands a score. Thresholds are strict: a score of exactly `0.7` is
    /// medium, not high.
    #[must_use]
    pub fn from_score(risk: f64) -> Self {
        if risk > 0.7 {
            Self::High
        } else if risk > 0.5 {
            Self::Medium
        } else if risk > 0.3 {
            Self::LowMedium
        } else {
            Self::Low
        }
    }

    /// Marker color.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "#ef4444",
            Self::Medium => "#f97316",
            Self::LowMedium => "#eab308",
            Self::Low => "#22c55e",
        }
    }
}

/// Marker radius for an area with `alert_count` alerts, clamped to
/// `[15, 30]`. A missing count counts as one.
#[must_use]
pub fn marker_radius(alert_count: Option<u32>) -> f64 {
    let count = f64::from(alert_count.unwrap_or(1));
    (1.5f64.mul_add(count, 10.0)).clamp(15.0, 30.0)
}

/// One area on the risk map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    /// Risk score in `[0, 1]`.
    pub risk: f64,
    pub area_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_count: Option<u32>,
}

impl HeatPoint {
    #[must_use]
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk)
    }

    /// Risk score as a percentage with one decimal, e.g. `"80.0%"`.
    #[must_use]
    pub fn risk_percent(&self) -> String {
        format!("{:.1}%", self.risk * 100.0)
    }

    #[must_use]
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle::for_point(self)
    }

    /// Groups map alerts by location into heat points.
    ///
    /// Each area sits at the mean of its alerts' coordinates, counts its
    /// alerts, and takes the risk of its most severe alert.
    #[must_use]
    pub fn from_map_alerts(alerts: &[MapAlert]) -> Vec<Self> {
        let mut areas: BTreeMap<&str, Vec<&MapAlert>> = BTreeMap::new();
        for alert in alerts {
            let area = alert
                .location
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_AREA);
            areas.entry(area).or_default().push(alert);
        }

        areas
            .into_iter()
            .map(|(area_name, alerts)| {
                #[allow(clippy::cast_precision_loss)]
                let n = alerts.len() as f64;
                Self {
                    lat: alerts.iter().map(|a| a.latitude).sum::<f64>() / n,
                    lon: alerts.iter().map(|a| a.longitude).sum::<f64>() / n,
                    risk: alerts
                        .iter()
                        .map(|a| severity_risk(&a.severity))
                        .fold(0.0, f64::max),
                    area_name: area_name.to_string(),
                    alert_count: u32::try_from(alerts.len()).ok(),
                }
            })
            .collect()
    }
}

/// Risk score implied by a single alert's severity.
#[must_use]
pub fn severity_risk(severity: &str) -> f64 {
    match severity.to_ascii_lowercase().as_str() {
        "critical" => 0.9,
        "high" => 0.75,
        "medium" => 0.55,
        "low" => 0.35,
        _ => 0.2,
    }
}

/// How a heat point's circle is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: u8,
    /// Stroke dash pattern; high-risk areas are dashed.
    pub dash_array: Option<&'static str>,
    pub opacity: f64,
    pub radius: f64,
}

impl MarkerStyle {
    #[must_use]
    pub fn for_point(point: &HeatPoint) -> Self {
        let level = point.level();
        let high = level == RiskLevel::High;
        Self {
            color: level.color(),
            fill_color: level.color(),
            fill_opacity: 0.6,
            weight: if high { 3 } else { 2 },
            dash_array: high.then_some("5,5"),
            opacity: if high { 0.8 } else { 1.0 },
            radius: marker_radius(point.alert_count),
        }
    }
}
