pub mod commit;
pub mod config;
pub mod document;
pub mod sync;
pub mod task_token;

pub use commit::{CommitInfo, CommitMessage, CommitRef, RawCommit};
pub use config::{
    Config, GitHubConfig, LoggingConfig, MatchingConfig, NotionConfig, RecordConfig,
};
pub use document::{CreatePageRequest, PageSummary, PropertyBag, PropertyFilter, PropertyValue};
pub use sync::{ResolvedTask, SyncOutcome, SyncRecord, SyncStage};
pub use task_token::{MatchStrategy, TaskKey, TaskToken};
