#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! REST client and submission surface for the emergency alert backend.
//!
//! [`api::ApiClient`] wraps a `reqwest` client with one method per backend
//! endpoint. Incident submission goes through the
//! [`transport::SubmissionTransport`] trait so that
//! [`surface::SubmissionSurface`], which owns the report being composed,
//! can be driven against a test double.

pub mod api;
pub mod surface;
pub mod transport;

pub use api::ApiClient;
pub use surface::{InFlight, SubmissionSurface, SubmitError};
pub use transport::SubmissionTransport;

use thiserror::Error;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Errors returned by backend calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error! status: {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error detail from the response body, or the raw body.
        detail: String,
    },

    /// The response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to requests when present.
    pub bearer_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Creates a config for `base_url` with no token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    /// Joins `path` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = ApiConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.url("/admin/overview"), "http://localhost:8000/admin/overview");
        assert_eq!(config.url("submit-alert/"), "http://localhost:8000/submit-alert/");
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ApiConfig::default().base_url, DEFAULT_API_BASE_URL);
        assert_eq!(ApiConfig::default().bearer_token, None);
    }

    #[test]
    fn status_error_message_carries_code() {
        let err = ClientError::Status {
            status: 500,
            detail: "Failed to submit alert".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 500: Failed to submit alert"
        );
    }
}
