//! Roles and application routes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Who a session belongs to.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Police,
    Ngo,
    Citizen,
}

impl Role {
    /// Where a freshly logged-in user of this role lands.
    #[must_use]
    pub const fn home_route(self) -> Route {
        match self {
            Self::Admin => Route::AdminDashboard,
            Self::Police => Route::PoliceDashboard,
            Self::Ngo => Route::NgoDashboard,
            Self::Citizen => Route::Alerts,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Police => "Police",
            Self::Ngo => "NGO",
            Self::Citizen => "Citizen",
        }
    }

    /// Returns all roles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Admin, Self::Police, Self::Ngo, Self::Citizen]
    }
}

/// Which part of the application a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteArea {
    /// Reachable without logging in.
    Public,
    /// Admin console.
    Admin,
    /// Dashboard of a single non-admin role.
    Dashboard(Role),
}

/// Every path the application serves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr,
)]
pub enum Route {
    #[strum(serialize = "/")]
    Home,
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/alerts")]
    Alerts,
    #[strum(serialize = "/about")]
    About,
    #[strum(serialize = "/contact")]
    Contact,
    #[strum(serialize = "/admin")]
    AdminDashboard,
    #[strum(serialize = "/admin/risk-map")]
    AdminRiskMap,
    #[strum(serialize = "/admin/alerts")]
    AdminAlerts,
    #[strum(serialize = "/admin/users")]
    AdminUsers,
    #[strum(serialize = "/admin/insights")]
    AdminInsights,
    #[strum(serialize = "/admin/reports")]
    AdminReports,
    #[strum(serialize = "/admin/settings")]
    AdminSettings,
    #[strum(serialize = "/police/dashboard")]
    PoliceDashboard,
    #[strum(serialize = "/ngo/dashboard")]
    NgoDashboard,
}

impl Route {
    /// The URL path of this route.
    #[must_use]
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Looks up the route serving `path`. Unknown paths are not found.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        path.parse().ok()
    }

    /// Which part of the application this route belongs to.
    #[must_use]
    pub const fn area(self) -> RouteArea {
        match self {
            Self::Home | Self::Login | Self::Alerts | Self::About | Self::Contact => {
                RouteArea::Public
            }
            Self::AdminDashboard
            | Self::AdminRiskMap
            | Self::AdminAlerts
            | Self::AdminUsers
            | Self::AdminInsights
            | Self::AdminReports
            | Self::AdminSettings => RouteArea::Admin,
            Self::PoliceDashboard => RouteArea::Dashboard(Role::Police),
            Self::NgoDashboard => RouteArea::Dashboard(Role::Ngo),
        }
    }

    /// Returns all routes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Home,
            Self::Login,
            Self::Alerts,
            Self::About,
            Self::Contact,
            Self::AdminDashboard,
            Self::AdminRiskMap,
            Self::AdminAlerts,
            Self::AdminUsers,
            Self::AdminInsights,
            Self::AdminReports,
            Self::AdminSettings,
            Self::PoliceDashboard,
            Self::NgoDashboard,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_routes() {
        assert_eq!(Role::Admin.home_route().path(), "/admin");
        assert_eq!(Role::Police.home_route().path(), "/police/dashboard");
        assert_eq!(Role::Ngo.home_route().path(), "/ngo/dashboard");
        assert_eq!(Role::Citizen.home_route().path(), "/alerts");
    }

    #[test]
    fn role_parses_from_stored_string() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("NGO".parse::<Role>().unwrap(), Role::Ngo);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Police.to_string(), "police");
    }

    #[test]
    fn paths_round_trip_through_lookup() {
        for route in Route::all() {
            assert_eq!(Route::from_path(route.path()), Some(*route));
            assert_eq!(route.to_string(), route.path());
        }
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn admin_area_covers_every_admin_path() {
        for route in Route::all() {
            let is_admin_path = route.path().starts_with("/admin");
            assert_eq!(route.area() == RouteArea::Admin, is_admin_path, "{route}");
        }
    }
}
