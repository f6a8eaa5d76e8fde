//! GitHub commit API response models.
//!
//! These structs map to the `GET /repos/{owner}/{repo}/commits/{ref}`
//! payload. Only the fields the sync needs are declared; the rest of the
//! response is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::RawCommit;

/// A commit returned by the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCommitResponse {
    /// Full commit SHA.
    pub sha: String,
    /// URL to view the commit in the GitHub UI.
    pub html_url: String,
    /// Git-level commit data.
    pub commit: GitHubCommitDetail,
}

/// The `commit` object nested in a commit response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCommitDetail {
    /// Full commit message, title and body.
    pub message: String,
    /// Who applied the commit.
    pub committer: GitHubGitActor,
    /// Who wrote the change (may differ from the committer).
    #[serde(default)]
    pub author: Option<GitHubGitActor>,
}

/// Name, email and timestamp of a git author or committer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubGitActor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// ISO 8601 timestamp.
    pub date: DateTime<Utc>,
}

impl From<GitHubCommitResponse> for RawCommit {
    fn from(resp: GitHubCommitResponse) -> Self {
        Self {
            sha: resp.sha,
            message: resp.commit.message,
            committer_name: resp.commit.committer.name,
            committed_at: resp.commit.committer.date,
            html_url: resp.html_url,
        }
    }
}
