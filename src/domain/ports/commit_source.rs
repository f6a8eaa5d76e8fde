use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CommitRef, RawCommit};

/// Port for fetching commit metadata from a source-control host.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Fetch a single commit by owner, repository and ref.
    async fn fetch_commit(&self, reference: &CommitRef) -> DomainResult<RawCommit>;
}
