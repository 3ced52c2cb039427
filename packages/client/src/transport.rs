//! The boundary an incident submission crosses.

use async_trait::async_trait;
use emergency_alert_client_models::SubmissionReceipt;
use emergency_alert_report::SubmissionPayload;

use crate::{ApiClient, ClientError};

/// Sends an assembled submission payload to the backend.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Transmits `payload` and returns the backend's receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure or a non-success
    /// response.
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmissionReceipt, ClientError>;
}

#[async_trait]
impl SubmissionTransport for ApiClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmissionReceipt, ClientError> {
        self.submit_incident_report(payload).await
    }
}
