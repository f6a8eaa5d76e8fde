//! Document store port.
//!
//! Implemented by the Notion adapter. Result lists are returned in the
//! store's native order; callers that pick "the first" match inherit that
//! ordering.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CreatePageRequest, PageSummary, PropertyFilter};

/// Port for reading and writing pages in a structured document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full-text search across pages shared with the integration.
    ///
    /// Results are not scoped to any database; callers filter on
    /// [`PageSummary::parent_database_id`].
    async fn search_pages(&self, query: &str) -> DomainResult<Vec<PageSummary>>;

    /// Query one database with a single-property filter.
    async fn query_database(
        &self,
        database_id: &str,
        filter: &PropertyFilter,
    ) -> DomainResult<Vec<PageSummary>>;

    /// Create a page in a database.
    async fn create_page(&self, request: &CreatePageRequest) -> DomainResult<PageSummary>;
}
