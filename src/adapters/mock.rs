//! Mock ports for testing.
//!
//! Both mocks return canned responses and record every call so tests can
//! assert which collaborators a run touched, and with what.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    CommitRef, CreatePageRequest, PageSummary, PropertyFilter, RawCommit,
};
use crate::domain::ports::{CommitSource, DocumentStore};

/// Mock commit source returning one fixed commit.
pub struct MockCommitSource {
    commit: Option<RawCommit>,
    requested: Arc<RwLock<Vec<CommitRef>>>,
}

impl MockCommitSource {
    pub fn new(commit: RawCommit) -> Self {
        Self {
            commit: Some(commit),
            requested: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A source whose fetch always fails, as if the commit did not exist.
    pub fn failing() -> Self {
        Self {
            commit: None,
            requested: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn requested(&self) -> Vec<CommitRef> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl CommitSource for MockCommitSource {
    async fn fetch_commit(&self, reference: &CommitRef) -> DomainResult<RawCommit> {
        self.requested.write().await.push(reference.clone());
        self.commit.clone().ok_or_else(|| DomainError::ApiError {
            service: "GitHub",
            status: 422,
            body: format!("No commit found for SHA: {}", reference.reference),
        })
    }
}

/// A call made against [`MockDocumentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Search(String),
    Query {
        database_id: String,
        filter: PropertyFilter,
    },
    Create(CreatePageRequest),
}

/// Operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Search,
    Query,
    Create,
}

/// Mock document store with scripted results.
pub struct MockDocumentStore {
    search_results: Vec<PageSummary>,
    query_results: HashMap<String, Vec<PageSummary>>,
    failing: Vec<StoreOperation>,
    created_id: String,
    calls: Arc<RwLock<Vec<StoreCall>>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            search_results: Vec::new(),
            query_results: HashMap::new(),
            failing: Vec::new(),
            created_id: "created-page".to_string(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Pages returned, in order, by every search.
    #[must_use]
    pub fn with_search_results(mut self, pages: Vec<PageSummary>) -> Self {
        self.search_results = pages;
        self
    }

    /// Pages returned, in order, by any query against `database_id`.
    #[must_use]
    pub fn with_query_results(mut self, database_id: &str, pages: Vec<PageSummary>) -> Self {
        self.query_results.insert(database_id.to_string(), pages);
        self
    }

    /// Make an operation fail with a 503.
    #[must_use]
    pub fn failing_on(mut self, operation: StoreOperation) -> Self {
        self.failing.push(operation);
        self
    }

    /// Id assigned to pages created through this store.
    #[must_use]
    pub fn with_created_id(mut self, id: &str) -> Self {
        self.created_id = id.to_string();
        self
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    pub async fn created(&self) -> Vec<CreatePageRequest> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                StoreCall::Create(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, operation: StoreOperation) -> DomainResult<()> {
        if self.failing.contains(&operation) {
            return Err(DomainError::ApiError {
                service: "Notion",
                status: 503,
                body: "service_unavailable: Notion is unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn search_pages(&self, query: &str) -> DomainResult<Vec<PageSummary>> {
        self.calls
            .write()
            .await
            .push(StoreCall::Search(query.to_string()));
        self.check(StoreOperation::Search)?;
        Ok(self.search_results.clone())
    }

    async fn query_database(
        &self,
        database_id: &str,
        filter: &PropertyFilter,
    ) -> DomainResult<Vec<PageSummary>> {
        self.calls.write().await.push(StoreCall::Query {
            database_id: database_id.to_string(),
            filter: filter.clone(),
        });
        self.check(StoreOperation::Query)?;
        Ok(self
            .query_results
            .get(database_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_page(&self, request: &CreatePageRequest) -> DomainResult<PageSummary> {
        self.calls
            .write()
            .await
            .push(StoreCall::Create(request.clone()));
        self.check(StoreOperation::Create)?;
        let mut page = PageSummary::new(self.created_id.clone()).in_database(&request.database_id);
        page.url = Some(format!(
            "https://www.notion.so/{}",
            self.created_id.replace('-', "")
        ));
        Ok(page)
    }
}
