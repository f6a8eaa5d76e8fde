//! Task resolver: maps a normalized task key to one task page.

use std::sync::Arc;

use crate::domain::errors::{DomainError, SyncError};
use crate::domain::models::{PageSummary, PropertyFilter, ResolvedTask, TaskKey};
use crate::domain::ports::DocumentStore;

/// Looks up task pages in the task database.
///
/// An opaque key is searched for as text and the hits are narrowed to pages
/// whose parent is the task database. A numeric key is matched by equality
/// on `id_property`. When several pages match, the first in the store's
/// order wins.
pub struct TaskResolver<S: DocumentStore> {
    store: Arc<S>,
    tasks_database: String,
    id_property: String,
}

impl<S: DocumentStore> TaskResolver<S> {
    pub fn new(
        store: Arc<S>,
        tasks_database: impl Into<String>,
        id_property: impl Into<String>,
    ) -> Self {
        Self {
            store,
            tasks_database: tasks_database.into(),
            id_property: id_property.into(),
        }
    }

    /// Resolve a key to at most one task.
    ///
    /// `Ok(None)` means the lookup succeeded and found nothing. A failed
    /// lookup is reported as [`SyncError::LookupUnavailable`] so callers can
    /// tell an absent task from an unreachable store.
    pub async fn resolve(&self, key: &TaskKey) -> Result<Option<ResolvedTask>, SyncError> {
        let candidates = match key {
            TaskKey::Opaque(query) => self.search(query).await,
            TaskKey::Numeric(value) => {
                let filter = PropertyFilter::NumberEquals {
                    property: self.id_property.clone(),
                    value: *value,
                };
                self.store
                    .query_database(&self.tasks_database, &filter)
                    .await
            }
        }
        .map_err(|e| lookup_unavailable(key, &e))?;

        if candidates.len() > 1 {
            tracing::warn!(
                key = %key,
                candidates = candidates.len(),
                chosen = %candidates[0].id,
                "multiple tasks match; using the first result"
            );
        }

        Ok(candidates.into_iter().next().map(|page| ResolvedTask { page_id: page.id }))
    }

    async fn search(&self, query: &str) -> Result<Vec<PageSummary>, DomainError> {
        let hits = self.store.search_pages(query).await?;
        let total = hits.len();
        let scoped: Vec<PageSummary> = hits
            .into_iter()
            .filter(|page| page.belongs_to(&self.tasks_database))
            .collect();

        tracing::debug!(
            query = %query,
            hits = total,
            in_task_database = scoped.len(),
            "task search scoped to task database"
        );
        Ok(scoped)
    }
}

fn lookup_unavailable(key: &TaskKey, err: &DomainError) -> SyncError {
    tracing::error!(key = %key, error = %err, "task lookup failed");
    SyncError::LookupUnavailable {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockDocumentStore, StoreCall, StoreOperation};

    const TASKS_DB: &str = "1f2e3d4c-5b6a-4978-8a9b-0c1d2e3f4a5b";

    fn resolver(store: &Arc<MockDocumentStore>) -> TaskResolver<MockDocumentStore> {
        TaskResolver::new(Arc::clone(store), TASKS_DB, "ID")
    }

    #[tokio::test]
    async fn test_opaque_key_searches_and_scopes_to_task_database() {
        let store = Arc::new(MockDocumentStore::new().with_search_results(vec![
            PageSummary::new("other-db-page").in_database("some-other-db"),
            PageSummary::new("loose-page"),
            PageSummary::new("task-page").in_database("1F2E3D4C5B6A49788A9B0C1D2E3F4A5B"),
        ]));

        let task = resolver(&store)
            .resolve(&TaskKey::Opaque("TASK-42".to_string()))
            .await
            .unwrap();

        assert_eq!(task.map(|t| t.page_id).as_deref(), Some("task-page"));
        assert_eq!(
            store.calls().await,
            vec![StoreCall::Search("TASK-42".to_string())]
        );
    }

    #[tokio::test]
    async fn test_numeric_key_queries_id_property() {
        let store = Arc::new(
            MockDocumentStore::new()
                .with_query_results(TASKS_DB, vec![PageSummary::new("task-42")]),
        );

        let task = resolver(&store)
            .resolve(&TaskKey::Numeric(42))
            .await
            .unwrap();

        assert_eq!(task.map(|t| t.page_id).as_deref(), Some("task-42"));
        assert_eq!(
            store.calls().await,
            vec![StoreCall::Query {
                database_id: TASKS_DB.to_string(),
                filter: PropertyFilter::NumberEquals {
                    property: "ID".to_string(),
                    value: 42,
                },
            }]
        );
    }

    #[tokio::test]
    async fn test_multiple_matches_take_first() {
        let store = Arc::new(MockDocumentStore::new().with_query_results(
            TASKS_DB,
            vec![PageSummary::new("first"), PageSummary::new("second")],
        ));

        let task = resolver(&store).resolve(&TaskKey::Numeric(7)).await.unwrap();
        assert_eq!(task.map(|t| t.page_id).as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_no_match_is_none() {
        let store = Arc::new(MockDocumentStore::new());
        let task = resolver(&store)
            .resolve(&TaskKey::Opaque("TASK-1".to_string()))
            .await
            .unwrap();
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_is_lookup_unavailable() {
        let store = Arc::new(MockDocumentStore::new().failing_on(StoreOperation::Search));
        let err = resolver(&store)
            .resolve(&TaskKey::Opaque("TASK-1".to_string()))
            .await
            .unwrap_err();

        match err {
            SyncError::LookupUnavailable { key, reason } => {
                assert_eq!(key, "\"TASK-1\"");
                assert!(reason.contains("503"));
            }
            other => panic!("Expected LookupUnavailable, got {other:?}"),
        }
    }
}
