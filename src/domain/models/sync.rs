//! Sync run state and results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::document::CreatePageRequest;

/// Forward-only stages of a sync run.
///
/// A run moves through these in order and never steps back. Failure at any
/// point aborts the run; the [`SyncError`](crate::domain::errors::SyncError)
/// records the last stage that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Start,
    CommitFetched,
    Parsed,
    TokenExtracted,
    TaskResolved,
    RecordWritten,
    Done,
}

impl SyncStage {
    /// The stage that follows this one, or `None` once done.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::CommitFetched),
            Self::CommitFetched => Some(Self::Parsed),
            Self::Parsed => Some(Self::TokenExtracted),
            Self::TokenExtracted => Some(Self::TaskResolved),
            Self::TaskResolved => Some(Self::RecordWritten),
            Self::RecordWritten => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::CommitFetched => "commit_fetched",
            Self::Parsed => "parsed",
            Self::TokenExtracted => "token_extracted",
            Self::TaskResolved => "task_resolved",
            Self::RecordWritten => "record_written",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The task page a commit is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTask {
    pub page_id: String,
}

/// The commit record created in the sync database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRecord {
    pub page_id: String,
    pub task_page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// A new commit record was written.
    Created { commit_sha: String, record: SyncRecord },
    /// A record for this commit already exists; nothing was written.
    AlreadySynced { commit_sha: String, page_id: String },
    /// Dry run: the request that would have been sent.
    DryRun {
        commit_sha: String,
        task_page_id: String,
        request: CreatePageRequest,
    },
}

impl SyncOutcome {
    pub fn commit_sha(&self) -> &str {
        match self {
            Self::Created { commit_sha, .. }
            | Self::AlreadySynced { commit_sha, .. }
            | Self::DryRun { commit_sha, .. } => commit_sha,
        }
    }
}
