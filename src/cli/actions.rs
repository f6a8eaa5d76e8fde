//! GitHub Actions runner integration.
//!
//! When running inside a workflow, failures are surfaced as `::error::`
//! annotations and successful runs publish step outputs through the file
//! named by `GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::models::SyncOutcome;

/// Whether the process is running as a workflow step.
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Format an `::error::` workflow command for a diagnostic.
pub fn error_annotation(message: &str) -> String {
    format!("::error title=notion-commit-sync::{}", escape_data(message))
}

/// Escape a workflow command's message per the runner's rules.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Step outputs for a finished run, as `name=value` pairs.
pub fn step_outputs(outcome: &SyncOutcome) -> Vec<(&'static str, String)> {
    let mut outputs = vec![("commit_sha", outcome.commit_sha().to_string())];
    match outcome {
        SyncOutcome::Created { record, .. } => {
            outputs.push(("outcome", "created".to_string()));
            outputs.push(("record_id", record.page_id.clone()));
            outputs.push(("task_id", record.task_page_id.clone()));
        }
        SyncOutcome::AlreadySynced { page_id, .. } => {
            outputs.push(("outcome", "already_synced".to_string()));
            outputs.push(("record_id", page_id.clone()));
        }
        SyncOutcome::DryRun { task_page_id, .. } => {
            outputs.push(("outcome", "dry_run".to_string()));
            outputs.push(("task_id", task_page_id.clone()));
        }
    }
    outputs
}

/// Append step outputs to the `GITHUB_OUTPUT` file.
pub fn write_step_outputs(path: &Path, outcome: &SyncOutcome) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file {}", path.display()))?;

    for (name, value) in step_outputs(outcome) {
        writeln!(file, "{name}={value}")
            .with_context(|| format!("Failed to write step output {name}"))?;
    }
    Ok(())
}
