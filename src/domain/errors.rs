//! Domain errors for the commit sync pipeline.

use thiserror::Error;

use super::models::sync::SyncStage;

/// Errors raised by the ports (GitHub and Notion adapters).
///
/// These describe *what went wrong on the wire*. The pipeline maps them into
/// [`SyncError`] variants, which describe *which step of the run failed*.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("{service} API returned {status}: {body}")]
    ApiError {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Fatal conditions that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to fetch commit {reference}: {reason}")]
    CommitFetchFailed { reference: String, reason: String },

    #[error("No task token found in commit title {title:?}")]
    TokenMissing { title: String },

    #[error("No matching task found for {key}")]
    TaskNotResolved { key: String },

    #[error("Task lookup for {key} could not be completed: {reason}")]
    LookupUnavailable { key: String, reason: String },

    #[error("Failed to create commit record: {reason}")]
    WriteFailed { reason: String },
}

impl SyncError {
    /// The last stage the run completed before aborting.
    pub const fn stage(&self) -> SyncStage {
        match self {
            Self::CommitFetchFailed { .. } => SyncStage::Start,
            Self::TokenMissing { .. } => SyncStage::Parsed,
            Self::TaskNotResolved { .. } | Self::LookupUnavailable { .. } => {
                SyncStage::TokenExtracted
            }
            Self::WriteFailed { .. } => SyncStage::TaskResolved,
        }
    }

    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CommitFetchFailed { .. } => 1,
            Self::TokenMissing { .. } => 2,
            Self::TaskNotResolved { .. } => 3,
            Self::LookupUnavailable { .. } => 4,
            Self::WriteFailed { .. } => 5,
        }
    }
}
