//! Typed wrappers around the backend REST endpoints.

use emergency_alert_client_models::{
    AlertPage, AlertQuery, AlertRecord, AlertStats, ApiErrorBody, Insights, MapAlerts,
    MessageResponse, OverviewStats, RealtimeAlert, RealtimeAlerts, SubmissionReceipt, UserPage,
    UserQuery,
};
use emergency_alert_report::{PayloadPart, SubmissionPayload};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::{ApiConfig, ClientError};

/// Maximum length of a response body quoted in an error.
const BODY_PREVIEW_LEN: usize = 500;

/// HTTP client for the emergency alert backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `config`.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// The connection settings in use.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.config.url(path));
        match &self.config.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    /// Submits an incident report as a multipart form to `/submit-alert/`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend answers
    /// with a non-success status, or the receipt cannot be parsed.
    pub async fn submit_incident_report(
        &self,
        payload: SubmissionPayload,
    ) -> Result<SubmissionReceipt, ClientError> {
        let form = multipart_form(payload)?;
        log::info!("Submitting incident report to {}", self.config.url("submit-alert/"));
        let receipt: SubmissionReceipt = send_json(
            self.request(reqwest::Method::POST, "submit-alert/")
                .multipart(form),
        )
        .await?;
        log::info!(
            "Incident report stored (primary id {}, real-time id {})",
            receipt.postgresql_id,
            receipt.firebase_id
        );
        Ok(receipt)
    }

    /// `GET /alerts/`: historical alerts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn alerts(&self) -> Result<Vec<AlertRecord>, ClientError> {
        send_json(self.get("alerts/")).await
    }

    /// `GET /alerts/active`: currently active historical alerts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn active_alerts(&self) -> Result<Vec<AlertRecord>, ClientError> {
        send_json(self.get("alerts/active")).await
    }

    /// `GET /firebase/alerts/`: the real-time feed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn realtime_alerts(&self) -> Result<Vec<RealtimeAlert>, ClientError> {
        let envelope: RealtimeAlerts = send_json(self.get("firebase/alerts/")).await?;
        Ok(envelope.alerts.into_vec())
    }

    /// `GET /firebase/alerts/active`: active alerts from the real-time feed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn active_realtime_alerts(&self) -> Result<Vec<RealtimeAlert>, ClientError> {
        let envelope: RealtimeAlerts = send_json(self.get("firebase/alerts/active")).await?;
        Ok(envelope.alerts.into_vec())
    }

    /// `GET /admin/overview`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn overview_stats(&self) -> Result<OverviewStats, ClientError> {
        send_json(self.get("admin/overview")).await
    }

    /// `GET /admin/alerts/all` with optional filters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn admin_alerts(&self, query: &AlertQuery) -> Result<AlertPage, ClientError> {
        send_json(self.get("admin/alerts/all").query(query)).await
    }

    /// `GET /admin/alerts/stats`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn alert_stats(&self) -> Result<AlertStats, ClientError> {
        send_json(self.get("admin/alerts/stats")).await
    }

    /// `GET /admin/users` with optional filters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn users(&self, query: &UserQuery) -> Result<UserPage, ClientError> {
        send_json(self.get("admin/users").query(query)).await
    }

    /// `DELETE /admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the user does not
    /// exist.
    pub async fn delete_user(&self, id: i64) -> Result<String, ClientError> {
        let response: MessageResponse = send_json(
            self.request(reqwest::Method::DELETE, &format!("admin/users/{id}")),
        )
        .await?;
        log::info!("Deleted user {id}");
        Ok(response.message)
    }

    /// `GET /admin/insights`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn insights(&self) -> Result<Insights, ClientError> {
        send_json(self.get("admin/insights")).await
    }

    /// `GET /admin/map/alerts`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    pub async fn map_alerts(&self) -> Result<MapAlerts, ClientError> {
        send_json(self.get("admin/map/alerts")).await
    }
}

/// Converts a submission payload into a `reqwest` multipart form,
/// preserving part order.
///
/// # Errors
///
/// Returns [`ClientError::Http`] if a part's content type is rejected.
pub fn multipart_form(payload: SubmissionPayload) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part {
            PayloadPart::Text { name, value } => form.text(name, value),
            PayloadPart::File {
                name,
                file_name,
                media_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(media_type.mime())?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

/// Sends a request and decodes a JSON response, turning non-success
/// statuses into [`ClientError::Status`].
async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        log::warn!("Backend answered HTTP {status}");
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Extracts `detail` from an error body, falling back to a preview of the
/// raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body).map_or_else(
        |_| body.chars().take(BODY_PREVIEW_LEN).collect(),
        |err| err.detail,
    )
}
