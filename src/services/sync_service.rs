//! Sync orchestrator: runs one commit through the whole pipeline.
//!
//! The run is a forward-only sequence of [`SyncStage`]s:
//!
//! ```text
//! Start -> CommitFetched -> Parsed -> TokenExtracted -> TaskResolved -> RecordWritten -> Done
//! ```
//!
//! Any failure aborts immediately with a [`SyncError`]. Nothing is retried
//! and no stage is revisited.

use std::sync::Arc;

use crate::domain::errors::SyncError;
use crate::domain::models::{
    CommitInfo, CommitRef, Config, MatchStrategy, SyncOutcome, SyncStage, TaskToken,
};
use crate::domain::ports::{CommitSource, DocumentStore};

use super::record_writer::RecordWriter;
use super::task_resolver::TaskResolver;

/// Options that change how a run ends, not what it computes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Build the record but do not create it.
    pub dry_run: bool,
}

/// Runs the commit-to-task sync for a single commit.
pub struct SyncService<C: CommitSource, S: DocumentStore> {
    commits: Arc<C>,
    strategy: MatchStrategy,
    resolver: TaskResolver<S>,
    writer: RecordWriter<S>,
    options: SyncOptions,
}

impl<C: CommitSource, S: DocumentStore> SyncService<C, S> {
    pub fn new(commits: Arc<C>, store: Arc<S>, config: &Config) -> Self {
        let resolver = TaskResolver::new(
            Arc::clone(&store),
            config.notion.tasks_database.as_str(),
            config.matching.id_property.as_str(),
        );
        let writer = RecordWriter::new(
            store,
            config.notion.sync_database.as_str(),
            config.record.clone(),
        );
        Self {
            commits,
            strategy: config.matching.strategy,
            resolver,
            writer,
            options: SyncOptions {
                dry_run: config.dry_run,
            },
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Sync one commit.
    ///
    /// On failure the run is aborted from whatever stage it reached, and the
    /// transition is logged before the error is returned.
    #[tracing::instrument(skip(self, reference), fields(commit = %reference, strategy = %self.strategy))]
    pub async fn run(&self, reference: &CommitRef) -> Result<SyncOutcome, SyncError> {
        let mut stage = SyncStage::Start;
        let result = self.run_stages(reference, &mut stage).await;
        if let Err(ref e) = result {
            tracing::error!(from = %stage, to = "aborted", error = %e, "sync aborted");
        }
        result
    }

    async fn run_stages(
        &self,
        reference: &CommitRef,
        stage: &mut SyncStage,
    ) -> Result<SyncOutcome, SyncError> {
        let raw = self.commits.fetch_commit(reference).await.map_err(|e| {
            tracing::error!(error = %e, "commit fetch failed");
            SyncError::CommitFetchFailed {
                reference: reference.to_string(),
                reason: e.to_string(),
            }
        })?;
        advance(stage, SyncStage::CommitFetched);

        let commit = CommitInfo::from(raw);
        advance(stage, SyncStage::Parsed);
        tracing::info!(sha = %commit.sha, title = %commit.title, "commit parsed");

        let key = TaskToken::extract(&commit.title)
            .and_then(|token| self.strategy.normalize(&token))
            .inspect_err(|e| tracing::error!(error = %e, "no usable task token"))?;
        advance(stage, SyncStage::TokenExtracted);
        tracing::info!(key = %key, "task token extracted");

        if let Some(existing) = self.writer.find_existing(&commit.sha).await? {
            tracing::info!(
                sha = %commit.sha,
                page_id = %existing.id,
                "commit already synced; skipping"
            );
            return Ok(SyncOutcome::AlreadySynced {
                commit_sha: commit.sha,
                page_id: existing.id,
            });
        }

        let task = self.resolver.resolve(&key).await?.ok_or_else(|| {
            tracing::error!(key = %key, "no matching task");
            SyncError::TaskNotResolved {
                key: key.to_string(),
            }
        })?;
        advance(stage, SyncStage::TaskResolved);
        tracing::info!(task = %task.page_id, "task resolved");

        let request = self
            .writer
            .build_request(&commit, &task, Some(commit.source_url.as_str()));

        if self.options.dry_run {
            tracing::info!("dry run; commit record not created");
            return Ok(SyncOutcome::DryRun {
                commit_sha: commit.sha,
                task_page_id: task.page_id,
                request,
            });
        }

        let record = self.writer.write(&request).await?;
        advance(stage, SyncStage::RecordWritten);
        advance(stage, SyncStage::Done);

        Ok(SyncOutcome::Created {
            commit_sha: commit.sha,
            record,
        })
    }
}

/// Move to the next stage. Stages are only ever entered in order.
fn advance(stage: &mut SyncStage, to: SyncStage) {
    debug_assert_eq!(stage.next(), Some(to), "sync stages must advance in order");
    tracing::debug!(from = %stage, to = %to, "stage transition");
    *stage = to;
}
