//! Badge tones for alert, user, and system values.

use strum_macros::{AsRefStr, Display};

/// A badge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Gray,
}

impl Tone {
    /// CSS hex color.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Red => "#ef4444",
            Self::Orange => "#f97316",
            Self::Yellow => "#eab308",
            Self::Green => "#22c55e",
            Self::Blue => "#3b82f6",
            Self::Purple => "#a855f7",
            Self::Gray => "#6b7280",
        }
    }

    /// Tone for an alert severity, matched case-insensitively.
    #[must_use]
    pub fn for_severity(severity: &str) -> Self {
        match severity.to_ascii_lowercase().as_str() {
            "critical" => Self::Red,
            "high" => Self::Orange,
            "medium" => Self::Yellow,
            "low" => Self::Green,
            _ => Self::Gray,
        }
    }

    /// Tone for an alert status.
    #[must_use]
    pub fn for_alert_status(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "active" => Self::Red,
            "resolved" => Self::Green,
            "archived" => Self::Gray,
            _ => Self::Blue,
        }
    }

    /// Tone for a user's role.
    #[must_use]
    pub fn for_user_role(role: &str) -> Self {
        match role.to_ascii_lowercase().as_str() {
            "admin" => Self::Purple,
            "police" => Self::Blue,
            "ngo" => Self::Green,
            _ => Self::Gray,
        }
    }

    /// Tone for a user's account status. Anything but active is red.
    #[must_use]
    pub fn for_user_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case("active") {
            Self::Green
        } else {
            Self::Red
        }
    }
}

/// How a measured service latency is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LatencyTier {
    Good,
    Degraded,
    Poor,
}

impl LatencyTier {
    /// Under 50 ms is good, under 100 ms degraded, anything else poor.
    #[must_use]
    pub const fn from_millis(latency_ms: u64) -> Self {
        if latency_ms < 50 {
            Self::Good
        } else if latency_ms < 100 {
            Self::Degraded
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Good => Tone::Green,
            Self::Degraded => Tone::Yellow,
            Self::Poor => Tone::Red,
        }
    }
}

/// Health of a monitored system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SystemStatus {
    Operational,
    Degraded,
    Down,
}

impl SystemStatus {
    /// Indicator color.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Operational => Tone::Green,
            Self::Degraded => Tone::Yellow,
            Self::Down => Tone::Red,
        }
    }

    /// Status of a service judged from one timed request. No answer means
    /// down; a poor latency means degraded.
    #[must_use]
    pub const fn from_latency(latency: Option<LatencyTier>) -> Self {
        match latency {
            None => Self::Down,
            Some(LatencyTier::Poor) => Self::Degraded,
            Some(LatencyTier::Good | LatencyTier::Degraded) => Self::Operational,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tones_ignore_case() {
        assert_eq!(Tone::for_severity("CRITICAL"), Tone::Red);
        assert_eq!(Tone::for_severity("High"), Tone::Orange);
        assert_eq!(Tone::for_severity("medium"), Tone::Yellow);
        assert_eq!(Tone::for_severity("low"), Tone::Green);
        assert_eq!(Tone::for_severity("unknown"), Tone::Gray);
    }

    #[test]
    fn status_and_role_tones() {
        assert_eq!(Tone::for_alert_status("active"), Tone::Red);
        assert_eq!(Tone::for_alert_status("resolved"), Tone::Green);
        assert_eq!(Tone::for_alert_status("archived"), Tone::Gray);
        assert_eq!(Tone::for_alert_status("pending"), Tone::Blue);

        assert_eq!(Tone::for_user_role("admin"), Tone::Purple);
        assert_eq!(Tone::for_user_role("police"), Tone::Blue);
        assert_eq!(Tone::for_user_role("ngo"), Tone::Green);
        assert_eq!(Tone::for_user_role("citizen"), Tone::Gray);

        assert_eq!(Tone::for_user_status("active"), Tone::Green);
        assert_eq!(Tone::for_user_status("suspended"), Tone::Red);
    }

    #[test]
    fn latency_thresholds_are_exclusive() {
        assert_eq!(LatencyTier::from_millis(49), LatencyTier::Good);
        assert_eq!(LatencyTier::from_millis(50), LatencyTier::Degraded);
        assert_eq!(LatencyTier::from_millis(99), LatencyTier::Degraded);
        assert_eq!(LatencyTier::from_millis(100), LatencyTier::Poor);
        assert_eq!(LatencyTier::from_millis(100).tone(), Tone::Red);
    }

    #[test]
    fn system_status_from_timed_request() {
        assert_eq!(SystemStatus::from_latency(None), SystemStatus::Down);
        assert_eq!(
            SystemStatus::from_latency(Some(LatencyTier::from_millis(30))),
            SystemStatus::Operational
        );
        assert_eq!(
            SystemStatus::from_latency(Some(LatencyTier::from_millis(65))),
            SystemStatus::Operational
        );
        assert_eq!(
            SystemStatus::from_latency(Some(LatencyTier::from_millis(120))),
            SystemStatus::Degraded
        );
    }

    #[test]
    fn system_status_tones() {
        assert_eq!(SystemStatus::Operational.tone(), Tone::Green);
        assert_eq!(SystemStatus::Degraded.tone(), Tone::Yellow);
        assert_eq!(SystemStatus::Down.tone(), Tone::Red);
        assert_eq!(SystemStatus::Down.to_string(), "down");
    }
}
