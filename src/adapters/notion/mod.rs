//! Notion document-store adapter.
//!
//! Implements the [`DocumentStore`](crate::domain::ports::DocumentStore)
//! port: page search for the opaque matching strategy, database queries for
//! the numeric strategy and the duplicate check, and page creation for
//! commit records.

pub mod client;
pub mod models;

pub use client::NotionClient;
