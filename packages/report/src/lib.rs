#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident report validation and submission payload assembly.
//!
//! A report goes through three steps before it reaches the network:
//!
//! 1. Evidence files are admitted one batch at a time by
//!    [`evidence::attach_files`], which enforces the file count, media
//!    type, and size limits.
//! 2. [`validate::validate_for_submit`] checks the required fields, the
//!    description length, and the consent flag, stopping at the first
//!    violation.
//! 3. [`payload::build_submission_payload`] turns the validated report
//!    into the ordered multipart field list the backend expects.
//!
//! Everything here is synchronous and free of I/O.

pub mod evidence;
pub mod payload;
pub mod report;
pub mod validate;

pub use emergency_alert_report_models as models;
pub use evidence::{AttachOutcome, EvidenceList, FileRejection, RejectionReason, attach_files};
pub use payload::{PayloadPart, SubmissionPayload, build_submission_payload};
pub use report::IncidentReport;
pub use validate::{DescriptionBound, RequiredField, ValidatedReport, validate_for_submit};

use thiserror::Error;

/// Errors raised while attaching a batch of evidence files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// Adding the batch would exceed the evidence limit. Nothing from the
    /// batch was admitted.
    #[error("Maximum {max} files allowed ({current} attached, {incoming} selected)")]
    TooManyFiles {
        /// Files already attached.
        current: usize,
        /// Files in the rejected batch.
        incoming: usize,
        /// The evidence limit.
        max: usize,
    },
}

/// Errors raised when editing an attached evidence entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvidenceError {
    /// No evidence entry exists at the given position.
    #[error("No evidence file at index {index} ({len} attached)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of attached files.
        len: usize,
    },
}

/// Reasons a report cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("Please fill in all required fields (missing {0})")]
    MissingField(RequiredField),

    /// The description is shorter or longer than allowed.
    #[error("Description must be between {min} and {max} characters ({bound}: {length})")]
    DescriptionOutOfBounds {
        /// Which bound was violated.
        bound: DescriptionBound,
        /// Actual length in characters.
        length: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },

    /// The reporter has not confirmed the information is accurate.
    #[error("Please verify that the information is accurate")]
    ConsentNotGiven,
}
