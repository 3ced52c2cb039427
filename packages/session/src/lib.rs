#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Session store, roles, route access, and application configuration.
//!
//! Nothing here is ambient: a [`Session`] is loaded from an explicit
//! [`store::SessionStore`], route access is decided by an injected
//! [`access::AccessPolicy`], and settings such as the theme travel in an
//! [`config::AppConfig`] passed to whoever needs them.

pub mod access;
pub mod config;
pub mod login;
pub mod role;
pub mod store;

pub use access::{Access, AccessPolicy, RolePolicy, guard};
pub use config::{AppConfig, ConfigError, ThemeMode};
pub use login::{
    CredentialVerifier, Credentials, LoginError, LoginField, StaticCredentials, login, logout,
};
pub use role::{Role, Route, RouteArea};
pub use store::{JsonFileStore, MemoryStore, SessionStore};

use thiserror::Error;

/// Store key holding the auth token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Store key holding the role string.
pub const USER_ROLE_KEY: &str = "user_role";

/// Store key holding the selected theme.
pub const THEME_KEY: &str = "theme";

/// Errors raised while reading or writing session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The stored role is not one of the known roles.
    #[error("Unknown role: {0:?}")]
    UnknownRole(String),

    /// The store file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not a JSON object of strings.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Who is using the application, as recorded in the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Auth token, present once logged in.
    pub token: Option<String>,
    /// Role recorded at login.
    pub role: Option<Role>,
}

impl Session {
    /// Reads the session from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownRole`] if the stored role string is
    /// not a known role.
    pub fn load(store: &dyn SessionStore) -> Result<Self, SessionError> {
        let token = store.get(AUTH_TOKEN_KEY);
        let role = store
            .get(USER_ROLE_KEY)
            .map(|raw| raw.parse::<Role>().map_err(|_| SessionError::UnknownRole(raw)))
            .transpose()?;
        Ok(Self { token, role })
    }

    /// Whether an auth token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether this is an authenticated admin session.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Whether this is an authenticated session with `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.is_authenticated() && self.role == Some(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_is_anonymous() {
        let session = Session::load(&MemoryStore::new()).unwrap();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn admin_token_and_role_load() {
        let mut store = MemoryStore::new();
        store.set(AUTH_TOKEN_KEY, "admin-token").unwrap();
        store.set(USER_ROLE_KEY, "admin").unwrap();

        let session = Session::load(&store).unwrap();
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.token.as_deref(), Some("admin-token"));
    }

    #[test]
    fn role_without_token_is_not_admin() {
        let mut store = MemoryStore::new();
        store.set(USER_ROLE_KEY, "admin").unwrap();
        assert!(!Session::load(&store).unwrap().is_admin());
    }

    #[test]
    fn unknown_role_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(AUTH_TOKEN_KEY, "t").unwrap();
        store.set(USER_ROLE_KEY, "superuser").unwrap();
        assert!(matches!(
            Session::load(&store),
            Err(SessionError::UnknownRole(role)) if role == "superuser"
        ));
    }
}
