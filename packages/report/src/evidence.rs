//! Evidence attachments and the batch admission filter.
//!
//! Files and captions are held in two parallel vectors that always have
//! the same length: every admitted file is seeded with an empty caption,
//! and removing a file removes the caption at the same index.

use emergency_alert_report_models::{
    CandidateFile, EvidenceFile, MAX_EVIDENCE_BYTES, MAX_EVIDENCE_FILES, MediaType,
};

use crate::{AttachError, EvidenceError};

/// Ordered evidence files with positionally paired captions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceList {
    files: Vec<EvidenceFile>,
    captions: Vec<String>,
}

impl EvidenceList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            captions: Vec::new(),
        }
    }

    /// Number of attached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// How many more files can be attached.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        MAX_EVIDENCE_FILES.saturating_sub(self.files.len())
    }

    /// Attached files, in attachment order.
    #[must_use]
    pub fn files(&self) -> &[EvidenceFile] {
        &self.files
    }

    /// Captions, positionally aligned with [`Self::files`].
    #[must_use]
    pub fn captions(&self) -> &[String] {
        &self.captions
    }

    /// Iterates over `(file, caption)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&EvidenceFile, &str)> {
        self.files
            .iter()
            .zip(self.captions.iter().map(String::as_str))
    }

    /// Replaces the caption of the file at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::IndexOutOfRange`] if no file is attached at
    /// `index`.
    pub fn set_caption(
        &mut self,
        index: usize,
        caption: impl Into<String>,
    ) -> Result<(), EvidenceError> {
        let len = self.len();
        let slot = self
            .captions
            .get_mut(index)
            .ok_or(EvidenceError::IndexOutOfRange { index, len })?;
        *slot = caption.into();
        Ok(())
    }

    /// Removes the file and caption at `index`, shifting later entries
    /// down by one.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::IndexOutOfRange`] if no file is attached at
    /// `index`; the list is left unchanged.
    pub fn remove(&mut self, index: usize) -> Result<(EvidenceFile, String), EvidenceError> {
        if index >= self.files.len() {
            return Err(EvidenceError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        let file = self.files.remove(index);
        let caption = self.captions.remove(index);
        Ok((file, caption))
    }

    fn push(&mut self, file: EvidenceFile) {
        self.files.push(file);
        self.captions.push(String::new());
    }
}

/// Why a single candidate file was dropped from a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Declared media type is not JPEG, PNG, or MP4.
    UnsupportedType {
        /// The declared MIME type.
        declared: String,
    },
    /// File is larger than the per-file limit.
    TooLarge {
        /// Declared size in bytes.
        size: u64,
    },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType { declared } => write!(
                f,
                "only JPG, PNG, and MP4 files are allowed (got {declared:?})"
            ),
            Self::TooLarge { size } => write!(
                f,
                "file size must be at most 10MB (got {size} bytes)"
            ),
        }
    }
}

/// A candidate file that was dropped from a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRejection {
    /// Name of the dropped file.
    pub name: String,
    /// Why it was dropped.
    pub reason: RejectionReason,
}

/// Result of a successful [`attach_files`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachOutcome {
    /// Number of files appended to the list.
    pub admitted: usize,
    /// Files dropped by the type/size filter, in batch order.
    pub rejected: Vec<FileRejection>,
}

/// Checks one candidate against the media type and size limits. Type is
/// checked before size.
///
/// # Errors
///
/// Returns the [`RejectionReason`] for the first failed check.
pub fn check_candidate(candidate: &CandidateFile) -> Result<MediaType, RejectionReason> {
    let media_type = MediaType::from_mime(&candidate.declared_type).ok_or_else(|| {
        RejectionReason::UnsupportedType {
            declared: candidate.declared_type.clone(),
        }
    })?;
    if candidate.size > MAX_EVIDENCE_BYTES {
        return Err(RejectionReason::TooLarge {
            size: candidate.size,
        });
    }
    Ok(media_type)
}

/// Admits a batch of candidate files into `list`.
///
/// The count limit is checked against the whole batch first: if the
/// current files plus every candidate would exceed
/// [`MAX_EVIDENCE_FILES`], the batch is rejected and `list` is untouched.
/// Otherwise each candidate is filtered on its own and the survivors are
/// appended in batch order with empty captions.
///
/// # Errors
///
/// Returns [`AttachError::TooManyFiles`] when the batch is too large.
pub fn attach_files(
    list: &mut EvidenceList,
    incoming: Vec<CandidateFile>,
) -> Result<AttachOutcome, AttachError> {
    if list.len() + incoming.len() > MAX_EVIDENCE_FILES {
        log::warn!(
            "Rejecting batch of {} file(s): {} already attached",
            incoming.len(),
            list.len()
        );
        return Err(AttachError::TooManyFiles {
            current: list.len(),
            incoming: incoming.len(),
            max: MAX_EVIDENCE_FILES,
        });
    }

    let mut outcome = AttachOutcome::default();
    for candidate in incoming {
        match check_candidate(&candidate) {
            Ok(media_type) => {
                log::debug!("Admitted evidence file {:?} ({media_type})", candidate.name);
                list.push(EvidenceFile {
                    name: candidate.name,
                    media_type,
                    size: candidate.size,
                    bytes: candidate.bytes,
                });
                outcome.admitted += 1;
            }
            Err(reason) => {
                log::warn!("Dropped evidence file {:?}: {reason}", candidate.name);
                outcome.rejected.push(FileRejection {
                    name: candidate.name,
                    reason,
                });
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    fn candidate(name: &str, mime: &str, size: u64) -> CandidateFile {
        CandidateFile {
            name: name.to_string(),
            declared_type: mime.to_string(),
            size,
            bytes: name.as_bytes().to_vec(),
        }
    }

    fn jpeg(name: &str) -> CandidateFile {
        candidate(name, "image/jpeg", MIB)
    }

    #[test]
    fn batch_exceeding_limit_is_rejected_whole() {
        let mut list = EvidenceList::new();
        let outcome = attach_files(&mut list, vec![jpeg("a.jpg"), jpeg("b.jpg")]).unwrap();
        assert_eq!(outcome.admitted, 2);

        let err = attach_files(&mut list, vec![jpeg("c.jpg"), jpeg("d.jpg")]).unwrap_err();
        assert_eq!(
            err,
            AttachError::TooManyFiles {
                current: 2,
                incoming: 2,
                max: 3
            }
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list.captions().len(), 2);
    }

    #[test]
    fn count_limit_uses_raw_batch_size() {
        // Two of the four candidates would be filtered out, but the batch
        // is still too large as selected.
        let mut list = EvidenceList::new();
        let batch = vec![
            jpeg("a.jpg"),
            jpeg("b.jpg"),
            candidate("c.gif", "image/gif", MIB),
            candidate("d.gif", "image/gif", MIB),
        ];
        assert!(attach_files(&mut list, batch).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn oversized_file_dropped_valid_file_admitted() {
        let mut list = EvidenceList::new();
        let outcome = attach_files(
            &mut list,
            vec![
                candidate("big.png", "image/png", 15 * MIB),
                candidate("ok.jpg", "image/jpeg", 2 * MIB),
            ],
        )
        .unwrap();

        assert_eq!(outcome.admitted, 1);
        assert_eq!(
            outcome.rejected,
            vec![FileRejection {
                name: "big.png".to_string(),
                reason: RejectionReason::TooLarge { size: 15 * MIB },
            }]
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list.files()[0].name, "ok.jpg");
        assert_eq!(list.files()[0].media_type, MediaType::Jpeg);
    }

    #[test]
    fn unsupported_type_is_dropped_before_size_check() {
        let mut list = EvidenceList::new();
        let outcome = attach_files(
            &mut list,
            vec![candidate("clip.mov", "video/quicktime", 20 * MIB)],
        )
        .unwrap();
        assert_eq!(outcome.admitted, 0);
        assert!(matches!(
            outcome.rejected[0].reason,
            RejectionReason::UnsupportedType { .. }
        ));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let mut list = EvidenceList::new();
        let outcome = attach_files(
            &mut list,
            vec![
                candidate("exact.mp4", "video/mp4", MAX_EVIDENCE_BYTES),
                candidate("over.mp4", "video/mp4", MAX_EVIDENCE_BYTES + 1),
            ],
        )
        .unwrap();
        assert_eq!(outcome.admitted, 1);
        assert_eq!(list.files()[0].name, "exact.mp4");
    }

    #[test]
    fn admitted_files_get_empty_captions_in_order() {
        let mut list = EvidenceList::new();
        attach_files(&mut list, vec![jpeg("a.jpg")]).unwrap();
        list.set_caption(0, "front door").unwrap();
        attach_files(&mut list, vec![jpeg("b.jpg"), jpeg("c.jpg")]).unwrap();

        let names: Vec<&str> = list.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(list.captions(), ["front door", "", ""]);
        assert_eq!(list.remaining_capacity(), 0);
    }

    #[test]
    fn never_exceeds_limit_across_batches() {
        let mut list = EvidenceList::new();
        for batch_size in [1, 3, 2, 1, 1, 4] {
            let batch = (0..batch_size).map(|i| jpeg(&format!("{i}.jpg"))).collect();
            let _ = attach_files(&mut list, batch);
            assert!(list.len() <= MAX_EVIDENCE_FILES);
            assert_eq!(list.len(), list.captions().len());
        }
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn remove_drops_paired_caption_and_shifts() {
        let mut list = EvidenceList::new();
        attach_files(&mut list, vec![jpeg("a.jpg"), jpeg("b.jpg")]).unwrap();
        list.set_caption(0, "first").unwrap();
        list.set_caption(1, "second").unwrap();

        let (file, caption) = list.remove(0).unwrap();
        assert_eq!(file.name, "a.jpg");
        assert_eq!(caption, "first");
        assert_eq!(list.len(), 1);
        assert_eq!(list.files()[0].name, "b.jpg");
        assert_eq!(list.captions(), ["second"]);
    }

    #[test]
    fn out_of_range_edits_leave_list_unchanged() {
        let mut list = EvidenceList::new();
        attach_files(&mut list, vec![jpeg("a.jpg")]).unwrap();
        let before = list.clone();

        assert_eq!(
            list.remove(1).unwrap_err(),
            EvidenceError::IndexOutOfRange { index: 1, len: 1 }
        );
        assert!(list.set_caption(5, "nope").is_err());
        assert_eq!(list, before);
    }
}
