//! The submission surface: one report being composed and sent.
//!
//! A surface owns its report exclusively. Submitting takes `&mut self`, so
//! a second submission of the same surface cannot start while one is
//! awaiting the backend. Because that borrow also hides the surface from
//! everyone else, the in-flight state is published through an [`InFlight`]
//! handle that a UI can hold and read while the submission is pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use emergency_alert_client_models::SubmissionReceipt;
use emergency_alert_report::{
    AttachError, AttachOutcome, EvidenceError, IncidentReport, ValidationError, attach_files,
    build_submission_payload, validate_for_submit,
};
use emergency_alert_report_models::{CandidateFile, EvidenceFile};
use thiserror::Error;

use crate::{ClientError, SubmissionTransport};

/// Why a submit attempt failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The report is not ready; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend could not be reached or rejected the report. The report
    /// is kept so it can be resubmitted.
    #[error("Failed to submit alert: {0}")]
    Transport(#[from] ClientError),
}

impl SubmitError {
    /// Whether resubmitting the same report may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Shared view of whether a surface is awaiting the backend.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Whether a submission is currently awaiting the backend.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn begin(&self) -> InFlightGuard<'_> {
        self.0.store(true, Ordering::Release);
        InFlightGuard(&self.0)
    }
}

/// Clears the flag when the submission finishes or is dropped mid-await.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Composes and submits one incident report.
pub struct SubmissionSurface<T> {
    transport: T,
    report: IncidentReport,
    in_flight: InFlight,
}

impl<T: SubmissionTransport> SubmissionSurface<T> {
    /// Opens a surface with an empty report.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            report: IncidentReport::new(),
            in_flight: InFlight::default(),
        }
    }

    /// The report as currently filled in.
    #[must_use]
    pub const fn report(&self) -> &IncidentReport {
        &self.report
    }

    /// Mutable access for field-by-field edits.
    pub const fn report_mut(&mut self) -> &mut IncidentReport {
        &mut self.report
    }

    /// Whether a submission is awaiting the backend.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_active()
    }

    /// A handle that keeps reporting the in-flight state while
    /// [`Self::submit`] holds the surface.
    #[must_use]
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    /// Attaches a batch of picked files. See
    /// [`emergency_alert_report::attach_files`].
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::TooManyFiles`] if the batch would exceed the
    /// evidence limit.
    pub fn attach_files(
        &mut self,
        incoming: Vec<CandidateFile>,
    ) -> Result<AttachOutcome, AttachError> {
        attach_files(&mut self.report.evidence, incoming)
    }

    /// Removes the evidence file and caption at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::IndexOutOfRange`] for a bad index.
    pub fn remove_evidence(&mut self, index: usize) -> Result<EvidenceFile, EvidenceError> {
        self.report.evidence.remove(index).map(|(file, _)| file)
    }

    /// Sets the caption of the evidence file at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::IndexOutOfRange`] for a bad index.
    pub fn set_caption(
        &mut self,
        index: usize,
        caption: impl Into<String>,
    ) -> Result<(), EvidenceError> {
        self.report.evidence.set_caption(index, caption)
    }

    /// Validates and sends the report.
    ///
    /// On success the surface resets to an empty report. On failure the
    /// report is left exactly as it was.
    ///
    /// # Errors
    ///
    /// * [`SubmitError::Validation`] if the report is not ready; the
    ///   transport is not called
    /// * [`SubmitError::Transport`] if transmission failed
    pub async fn submit(&mut self) -> Result<SubmissionReceipt, SubmitError> {
        let payload = {
            let validated = validate_for_submit(&self.report)?;
            build_submission_payload(&validated)
        };

        let result = {
            let _busy = self.in_flight.begin();
            self.transport.submit(payload).await
        };

        match result {
            Ok(receipt) => {
                log::info!("Alert submitted (primary id {})", receipt.postgresql_id);
                self.report.clear();
                Ok(receipt)
            }
            Err(e) => {
                log::error!("Error submitting alert: {e}");
                Err(SubmitError::Transport(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;
    use emergency_alert_report::{PayloadPart, RequiredField, SubmissionPayload};
    use emergency_alert_report_models::{IncidentCategory, UrgencyLevel};

    use super::*;

    /// Records payloads and answers with a fixed status.
    struct FakeTransport {
        status: u16,
        calls: AtomicUsize,
        last_fields: Mutex<Vec<&'static str>>,
    }

    impl FakeTransport {
        fn answering(status: u16) -> Self {
            Self {
                status,
                calls: AtomicUsize::new(0),
                last_fields: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SubmissionTransport for FakeTransport {
        async fn submit(
            &self,
            payload: SubmissionPayload,
        ) -> Result<SubmissionReceipt, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_fields.lock().unwrap() =
                payload.parts().iter().map(PayloadPart::name).collect();
            if self.status == 200 {
                Ok(SubmissionReceipt {
                    message: "Alert submitted successfully".to_string(),
                    postgresql_id: 17,
                    firebase_id: "-Nrt17".to_string(),
                    status: "active".to_string(),
                    timestamp: "2025-02-01T10:00:00".to_string(),
                })
            } else {
                Err(ClientError::Status {
                    status: self.status,
                    detail: "Failed to submit alert".to_string(),
                })
            }
        }
    }

    /// Never answers.
    struct StalledTransport;

    #[async_trait]
    impl SubmissionTransport for StalledTransport {
        async fn submit(
            &self,
            _payload: SubmissionPayload,
        ) -> Result<SubmissionReceipt, ClientError> {
            std::future::pending().await
        }
    }

    fn fill_valid<T: SubmissionTransport>(surface: &mut SubmissionSurface<T>) {
        let report = surface.report_mut();
        report.category = Some(IncidentCategory::Fraud);
        report.location.pincode = "10001".to_string();
        report.description = "d".repeat(100);
        report.urgency = Some(UrgencyLevel::Low);
        report.consent_confirmed = true;
    }

    #[tokio::test]
    async fn successful_submit_resets_report() {
        let mut surface = SubmissionSurface::new(FakeTransport::answering(200));
        fill_valid(&mut surface);

        let receipt = surface.submit().await.unwrap();
        assert_eq!(receipt.postgresql_id, 17);
        assert_eq!(receipt.firebase_id, "-Nrt17");
        assert_eq!(surface.report(), &IncidentReport::default());
        assert!(!surface.is_submitting());

        let fields = surface.transport.last_fields.lock().unwrap().clone();
        assert!(!fields.contains(&"files"));
        assert!(!fields.contains(&"file_captions"));
        assert!(!fields.contains(&"other_category"));
    }

    #[tokio::test]
    async fn transport_failure_keeps_report() {
        let mut surface = SubmissionSurface::new(FakeTransport::answering(500));
        fill_valid(&mut surface);
        surface
            .attach_files(vec![CandidateFile::new("a.jpg", "image/jpeg", vec![1])])
            .unwrap();
        surface.set_caption(0, "broken lock").unwrap();
        let before = surface.report().clone();

        let err = surface.submit().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(
            err,
            SubmitError::Transport(ClientError::Status { status: 500, .. })
        ));
        assert_eq!(surface.report(), &before);
        assert!(!surface.is_submitting());

        // Resubmitting sends the same report again.
        let _ = surface.submit().await;
        assert_eq!(surface.transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_transport() {
        let mut surface = SubmissionSurface::new(FakeTransport::answering(200));
        fill_valid(&mut surface);
        surface.report_mut().category = None;

        let err = surface.submit().await.unwrap_err();
        assert!(!err.is_retryable());
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::MissingField(RequiredField::Category))
        ));
        assert_eq!(surface.transport.calls.load(Ordering::SeqCst), 0);
        assert_eq!(surface.report().description.len(), 100);
    }

    #[tokio::test]
    async fn in_flight_is_visible_while_pending() {
        let mut surface = SubmissionSurface::new(StalledTransport);
        fill_valid(&mut surface);
        let busy = surface.in_flight();
        assert!(!busy.is_active());

        let observed = tokio::select! {
            biased;
            _ = surface.submit() => None,
            () = tokio::task::yield_now() => Some(busy.is_active()),
        };

        assert_eq!(observed, Some(true));
        assert!(!busy.is_active());
    }

    #[tokio::test]
    async fn abandoned_submit_clears_in_flight_and_keeps_report() {
        let mut surface = SubmissionSurface::new(StalledTransport);
        fill_valid(&mut surface);
        let before = surface.report().clone();

        let outcome = tokio::time::timeout(Duration::from_millis(10), surface.submit()).await;

        assert!(outcome.is_err());
        assert!(!surface.is_submitting());
        assert!(!surface.in_flight().is_active());
        assert_eq!(surface.report(), &before);
    }

    #[test]
    fn remove_evidence_shifts_remaining_item() {
        let mut surface = SubmissionSurface::new(FakeTransport::answering(200));
        surface
            .attach_files(vec![
                CandidateFile::new("a.jpg", "image/jpeg", vec![1]),
                CandidateFile::new("b.png", "image/png", vec![2]),
            ])
            .unwrap();
        surface.set_caption(0, "first").unwrap();
        surface.set_caption(1, "second").unwrap();

        let removed = surface.remove_evidence(0).unwrap();
        assert_eq!(removed.name, "a.jpg");

        let evidence = &surface.report().evidence;
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence.files()[0].name, "b.png");
        assert_eq!(evidence.captions(), ["second"]);
    }
}
