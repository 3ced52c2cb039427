//! Logging in and out.

use thiserror::Error;

use crate::{AUTH_TOKEN_KEY, Role, Route, SessionError, SessionStore, USER_ROLE_KEY};

/// A login form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LoginField {
    Role,
    UserId,
    Password,
}

/// Why a login attempt failed.
#[derive(Debug, Error)]
pub enum LoginError {
    /// A form field was left empty.
    #[error("Please fill in all fields (missing {0})")]
    MissingField(LoginField),

    /// The verifier rejected the user id and password.
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    /// The session could not be written.
    #[error(transparent)]
    Store(#[from] SessionError),
}

/// What the login form collects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub role: Option<Role>,
    pub user_id: String,
    pub password: String,
}

/// Checks a user id and password, returning the auth token to store.
pub trait CredentialVerifier {
    /// Returns the token for a valid pair, `None` otherwise.
    fn verify(&self, user_id: &str, password: &str) -> Option<String>;
}

/// Accepts exactly one user id and password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub user_id: String,
    pub password: String,
    pub token: String,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            token: token.into(),
        }
    }
}

impl Default for StaticCredentials {
    /// The demo admin account.
    fn default() -> Self {
        Self::new("admin", "admin123", "admin-token")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, user_id: &str, password: &str) -> Option<String> {
        (user_id == self.user_id && password == self.password).then(|| self.token.clone())
    }
}

/// Logs in and returns the route to land on.
///
/// Admins are checked against `verifier` and have their token and role
/// written to `store`. Other roles are sent to their dashboard without
/// verification.
///
/// # Errors
///
/// * [`LoginError::MissingField`] if any field is empty
/// * [`LoginError::InvalidCredentials`] if the admin pair is rejected
/// * [`LoginError::Store`] if the session cannot be written
pub fn login(
    store: &mut dyn SessionStore,
    verifier: &dyn CredentialVerifier,
    credentials: &Credentials,
) -> Result<Route, LoginError> {
    let role = credentials
        .role
        .ok_or(LoginError::MissingField(LoginField::Role))?;
    if credentials.user_id.is_empty() {
        return Err(LoginError::MissingField(LoginField::UserId));
    }
    if credentials.password.is_empty() {
        return Err(LoginError::MissingField(LoginField::Password));
    }

    if role == Role::Admin {
        let Some(token) = verifier.verify(&credentials.user_id, &credentials.password) else {
            log::warn!("Rejected admin login for {:?}", credentials.user_id);
            return Err(LoginError::InvalidCredentials);
        };
        store.set(AUTH_TOKEN_KEY, &token)?;
        store.set(USER_ROLE_KEY, role.as_ref())?;
    }

    log::info!("Logged in as {role}");
    Ok(role.home_route())
}

/// Clears the stored token and role.
///
/// # Errors
///
/// Returns [`SessionError`] if the store cannot be written.
pub fn logout(store: &mut dyn SessionStore) -> Result<(), SessionError> {
    store.remove(AUTH_TOKEN_KEY)?;
    store.remove(USER_ROLE_KEY)?;
    log::info!("Logged out");
    Ok(())
}
