//! Domain layer for the commit sync pipeline
//!
//! This module contains the pure parsing and matching rules, the models
//! exchanged between components, and the port traits the adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, SyncError};
