//! Record writer: builds and creates the commit record.

use std::sync::Arc;

use crate::domain::errors::SyncError;
use crate::domain::models::{
    CommitInfo, CreatePageRequest, PageSummary, PropertyBag, PropertyFilter, PropertyValue,
    RecordConfig, ResolvedTask, SyncRecord,
};
use crate::domain::ports::DocumentStore;

/// Writes commit records into the sync database.
pub struct RecordWriter<S: DocumentStore> {
    store: Arc<S>,
    sync_database: String,
    record: RecordConfig,
}

impl<S: DocumentStore> RecordWriter<S> {
    pub fn new(store: Arc<S>, sync_database: impl Into<String>, record: RecordConfig) -> Self {
        Self {
            store,
            sync_database: sync_database.into(),
            record,
        }
    }

    /// Whether records carry the commit SHA, which enables [`find_existing`](Self::find_existing).
    pub fn tracks_commits(&self) -> bool {
        non_blank(self.record.commit_property.as_deref()).is_some()
    }

    /// Build the property bag for a commit record.
    ///
    /// The URL property is added only when both a source URL and a URL
    /// property name are present; otherwise the key is left out entirely.
    pub fn build_properties(
        &self,
        commit: &CommitInfo,
        task: &ResolvedTask,
        source_url: Option<&str>,
    ) -> PropertyBag {
        let mut properties = PropertyBag::new();
        properties.insert(
            self.record.title_property.clone(),
            PropertyValue::Title(commit.title.clone()),
        );
        properties.insert(
            self.record.description_property.clone(),
            PropertyValue::RichText(commit.body.clone()),
        );
        properties.insert(
            self.record.date_property.clone(),
            PropertyValue::Date(commit.committed_at),
        );
        properties.insert(
            self.record.committer_property.clone(),
            PropertyValue::RichText(commit.author_name.clone()),
        );
        properties.insert(
            self.record.task_property.clone(),
            PropertyValue::Relation(vec![task.page_id.clone()]),
        );

        if let (Some(name), Some(url)) = (
            non_blank(self.record.url_property.as_deref()),
            non_blank(source_url),
        ) {
            properties.insert(name.to_string(), PropertyValue::Url(url.to_string()));
        }

        if let Some(name) = non_blank(self.record.commit_property.as_deref()) {
            properties.insert(name.to_string(), PropertyValue::RichText(commit.sha.clone()));
        }

        properties
    }

    /// Build the full create request for a commit record.
    pub fn build_request(
        &self,
        commit: &CommitInfo,
        task: &ResolvedTask,
        source_url: Option<&str>,
    ) -> CreatePageRequest {
        CreatePageRequest {
            database_id: self.sync_database.clone(),
            properties: self.build_properties(commit, task, source_url),
            icon: non_blank(self.record.icon.as_deref()).map(str::to_string),
        }
    }

    /// Look for a record already written for this commit.
    ///
    /// Always `Ok(None)` unless a commit property is configured.
    pub async fn find_existing(&self, sha: &str) -> Result<Option<PageSummary>, SyncError> {
        let Some(property) = non_blank(self.record.commit_property.as_deref()) else {
            return Ok(None);
        };

        let filter = PropertyFilter::RichTextEquals {
            property: property.to_string(),
            value: sha.to_string(),
        };
        let existing = self
            .store
            .query_database(&self.sync_database, &filter)
            .await
            .map_err(|e| {
                tracing::error!(sha = %sha, error = %e, "duplicate check failed");
                SyncError::LookupUnavailable {
                    key: format!("commit {sha}"),
                    reason: e.to_string(),
                }
            })?;

        Ok(existing.into_iter().next())
    }

    /// Create the record. Not retried; a failure is reported as
    /// [`SyncError::WriteFailed`].
    ///
    /// A timeout after Notion persisted the page still reports failure, so a
    /// rerun may produce a duplicate unless the commit property is set.
    pub async fn write(&self, request: &CreatePageRequest) -> Result<SyncRecord, SyncError> {
        let task_page_id = request
            .properties
            .get(&self.record.task_property)
            .and_then(|value| match value {
                PropertyValue::Relation(ids) => ids.first().cloned(),
                _ => None,
            })
            .unwrap_or_default();

        let page = self.store.create_page(request).await.map_err(|e| {
            tracing::error!(
                database = %self.sync_database,
                task = %task_page_id,
                error = %e,
                "failed to create commit record"
            );
            SyncError::WriteFailed {
                reason: e.to_string(),
            }
        })?;

        tracing::info!(page_id = %page.id, task = %task_page_id, "commit record created");
        Ok(SyncRecord {
            page_id: page.id,
            task_page_id,
            url: page.url,
        })
    }
}

/// Treat empty strings the same as unset; Actions passes absent inputs as "".
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
