//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON output on stderr
//! - Optional JSON log file
//! - Secret scrubbing for API error bodies

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
pub use secret_scrubbing::{scrub_secrets, SecretScrubber};
