//! notion-commit-sync - link GitHub commits to Notion tasks
//!
//! A commit whose title starts with a bracketed task token, such as
//! `[TASK-42] Fix login`, is recorded as a page in a Notion sync database
//! with a relation to the matching task page.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Parsing and matching rules, models, and ports
//! - **Adapter Layer** (`adapters`): GitHub and Notion HTTP clients, plus mocks
//! - **Service Layer** (`services`): Task resolution, record writing, the sync run
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line and GitHub Actions surface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use notion_commit_sync::{ConfigLoader, GitHubClient, NotionClient, SyncService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(None)?;
//!     ConfigLoader::validate(&config)?;
//!     let service = SyncService::new(
//!         Arc::new(GitHubClient::from_config(&config.github)),
//!         Arc::new(NotionClient::from_config(&config.notion)),
//!         &config,
//!     );
//!     let outcome = service.run(&config.commit_ref()).await?;
//!     println!("{}", outcome.commit_sha());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{GitHubClient, NotionClient};
pub use domain::models::{
    CommitInfo, CommitMessage, CommitRef, Config, MatchStrategy, SyncOutcome, SyncStage, TaskKey,
    TaskToken,
};
pub use domain::ports::{CommitSource, DocumentStore};
pub use domain::{DomainError, DomainResult, SyncError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{RecordWriter, SyncOptions, SyncService, TaskResolver};
