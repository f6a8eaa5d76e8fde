//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - `COMMIT_SYNC_*` environment overrides
//! - GitHub Actions `INPUT_*` inputs
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
