//! Pipeline Error Types
//!
//! Domain-specific error taxonomy for the resume ingestion pipeline, matching the
//! fatal/non-fatal split the orchestrator relies on: most failure modes (decode
//! trouble, LLM unavailability) are absorbed internally and never reach here.

use thiserror::Error;

/// Errors that can escape the pipeline entry point.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// File extension is not one of pdf/docx/doc.
    #[error("unsupported resume format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Malformed request (missing file bytes, empty filename, etc).
    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    /// The subject has no profile to attach a resume to.
    #[error("profile not found for subject {subject_id}")]
    NotFound { subject_id: String },

    /// Blob upload failed on every bucket attempted.
    #[error("failed to store resume blob at {path}: {source}")]
    StorageError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Metadata store write failed after the blob was (or was not) persisted.
    #[error("failed to persist resume metadata for subject {subject_id}: {source}")]
    PersistenceError {
        subject_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn not_found(subject_id: impl Into<String>) -> Self {
        Self::NotFound {
            subject_id: subject_id.into(),
        }
    }

    pub fn storage_error(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::StorageError {
            path: path.into(),
            source,
        }
    }

    pub fn persistence_error(subject_id: impl Into<String>, source: anyhow::Error) -> Self {
        Self::PersistenceError {
            subject_id: subject_id.into(),
            source,
        }
    }

    /// Whether the caller can usefully retry without changing the request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageError { .. } | Self::PersistenceError { .. })
    }

    /// UI-safe message; never leaks internal source error text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFormat { extension } => {
                format!("Resumes in .{extension} format are not supported. Use PDF, DOCX, or DOC.")
            }
            Self::BadRequest { reason } => format!("Invalid upload: {reason}"),
            Self::NotFound { .. } => "No matching profile was found.".to_string(),
            Self::StorageError { .. } => {
                "Could not store the resume file. Please try again.".to_string()
            }
            Self::PersistenceError { .. } => {
                "The resume was stored but could not be saved to your profile.".to_string()
            }
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
