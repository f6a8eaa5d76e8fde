//! Commit domain model and commit message parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies the commit to fetch from the source-control host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub owner: String,
    pub repo: String,
    /// A SHA, or a ref path such as `heads/main`.
    pub reference: String,
}

impl CommitRef {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            reference: reference.into(),
        }
    }
}

impl std::fmt::Display for CommitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.reference)
    }
}

/// A commit as returned by the source-control port, before message parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub message: String,
    pub committer_name: String,
    pub committed_at: DateTime<Utc>,
    pub html_url: String,
}

/// Title and body split out of a raw commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub title: String,
    pub body: String,
}

impl CommitMessage {
    /// Split a raw commit message into title and body.
    ///
    /// Every blank or whitespace-only line is dropped, including blank lines
    /// inside the body, so paragraphs are flattened into consecutive lines.
    /// The first remaining line is the title and the rest form the body.
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.lines().filter(|line| !line.trim().is_empty());
        let title = lines.next().unwrap_or_default().to_string();
        let body = lines.collect::<Vec<_>>().join("\n");
        Self { title, body }
    }
}

/// A parsed commit, ready to be linked to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub committed_at: DateTime<Utc>,
    pub source_url: String,
}

impl From<RawCommit> for CommitInfo {
    fn from(raw: RawCommit) -> Self {
        let CommitMessage { title, body } = CommitMessage::parse(&raw.message);
        Self {
            sha: raw.sha,
            title,
            body,
            author_name: raw.committer_name,
            committed_at: raw.committed_at,
            source_url: raw.html_url,
        }
    }
}
