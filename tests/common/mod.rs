//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across the pipeline and adapter tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use notion_commit_sync::domain::models::{Config, RawCommit};

pub const TASKS_DB: &str = "a1b2c3d4-0000-4000-8000-00000000aaaa";
pub const SYNC_DB: &str = "e5f6a7b8-0000-4000-8000-00000000bbbb";
pub const SHA: &str = "6dcb09b5b57875f334f61aebed695e2e4193db5e";

/// A raw commit with the given message and fixed metadata.
pub fn raw_commit(message: &str) -> RawCommit {
    RawCommit {
        sha: SHA.to_string(),
        message: message.to_string(),
        committer_name: "Monalisa Octocat".to_string(),
        committed_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap(),
        html_url: format!("https://github.com/octo/app/commit/{SHA}"),
    }
}

/// A complete, valid config pointing at the fixture databases.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.github.token = "ghp_testtoken".to_string();
    config.github.owner = "octo".to_string();
    config.github.repo = "app".to_string();
    config.notion.token = "secret_testtoken".to_string();
    config.notion.sync_database = SYNC_DB.to_string();
    config.notion.tasks_database = TASKS_DB.to_string();
    config
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
