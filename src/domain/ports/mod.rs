//! Port trait definitions (Hexagonal Architecture)
//!
//! The pipeline talks to the outside world only through these traits:
//! - CommitSource: fetches a commit from the source-control host
//! - DocumentStore: searches, queries and creates pages in the document store
//!
//! Tests substitute in-memory implementations; production wires the GitHub
//! and Notion adapters.

pub mod commit_source;
pub mod document_store;

pub use commit_source::CommitSource;
pub use document_store::DocumentStore;
