//! GitHub source-control adapter.
//!
//! Fetches commit metadata through the GitHub REST API and implements the
//! [`CommitSource`](crate::domain::ports::CommitSource) port.

pub mod client;
pub mod models;

pub use client::GitHubClient;
