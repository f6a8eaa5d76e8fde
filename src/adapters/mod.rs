//! Adapters for the external systems the sync talks to.

pub mod github;
pub mod mock;
pub mod notion;
pub mod rate_limiter;

pub use github::GitHubClient;
pub use notion::NotionClient;
