#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Presentation lookup tables for the admin views.
//!
//! Everything here is a pure function from a backend value to how it is
//! shown: risk colors and marker sizes for the risk map, and badge tones
//! for severities, statuses, roles, and system health.

pub mod badge;
pub mod risk;

pub use badge::{LatencyTier, SystemStatus, Tone};
pub use risk::{HeatPoint, MarkerStyle, RiskLevel, marker_radius};

/// Tile layer the risk map is drawn on.
pub const MAP_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the tile layer.
pub const MAP_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
