//! Route access decisions.

use crate::{Route, Session, role::RouteArea};

/// Outcome of guarding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The route may be shown.
    Granted,
    /// The session must go elsewhere first.
    Redirect(Route),
}

/// Decides whether a session may open a route.
pub trait AccessPolicy {
    /// Whether `session` may open `route`.
    fn allows(&self, session: &Session, route: Route) -> bool;
}

/// Public routes are open to everyone, admin routes need an authenticated
/// admin, and role dashboards need an authenticated session of that role.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl AccessPolicy for RolePolicy {
    fn allows(&self, session: &Session, route: Route) -> bool {
        match route.area() {
            RouteArea::Public => true,
            RouteArea::Admin => session.is_admin(),
            RouteArea::Dashboard(role) => session.has_role(role),
        }
    }
}

/// Guards `route` for `session`, redirecting to the login page when the
/// policy refuses.
#[must_use]
pub fn guard(policy: &dyn AccessPolicy, session: &Session, route: Route) -> Access {
    if policy.allows(session, route) {
        Access::Granted
    } else {
        log::debug!("Redirecting {route} to login");
        Access::Redirect(Route::Login)
    }
}
