//! Command-line entry: load config, wire adapters, run one sync.

pub mod actions;
pub mod output;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{GitHubClient, NotionClient};
use crate::domain::errors::SyncError;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::SyncService;

pub use output::{output, CommandOutput};
pub use types::Cli;

/// Run the sync described by the command line and the loaded config.
///
/// A [`SyncError`] is returned unchanged inside the `anyhow::Error` so
/// [`handle_error`] can map it to its exit code.
pub async fn execute(cli: &Cli) -> Result<()> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    ConfigLoader::validate(&config).context("Invalid configuration")?;

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let reference = config.commit_ref();
    tracing::info!(
        commit = %reference,
        dry_run = config.dry_run,
        "starting commit sync"
    );

    let commits = Arc::new(GitHubClient::from_config(&config.github));
    let store = Arc::new(NotionClient::from_config(&config.notion));
    let service = SyncService::new(commits, store, &config);

    let outcome = service.run(&reference).await?;

    output(&outcome, cli.json);

    if let Some(path) = std::env::var_os("GITHUB_OUTPUT") {
        actions::write_step_outputs(path.as_ref(), &outcome)?;
    }

    Ok(())
}

/// Report a failed run and exit with its code.
///
/// Sync failures use their own exit codes; anything else (bad config,
/// logger setup, output file) exits with 1.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    let code = err.downcast_ref::<SyncError>().map_or(1, SyncError::exit_code);
    let message = format!("{err:#}");

    eprintln!("Error: {message}");

    if actions::is_github_actions() {
        println!("{}", actions::error_annotation(&message));
    }

    if json_mode {
        let body = serde_json::json!({
            "outcome": "failed",
            "error": message,
            "exit_code": code,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    }

    std::process::exit(code)
}
