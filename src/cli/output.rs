//! Output formatting utilities for the CLI.

use serde::Serialize;

use crate::domain::models::{PropertyValue, SyncOutcome};

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

impl CommandOutput for SyncOutcome {
    fn to_human(&self) -> String {
        match self {
            Self::Created { commit_sha, record } => {
                let mut lines = vec![format!(
                    "Success! Commit {} linked to task {}.",
                    short_sha(commit_sha),
                    record.task_page_id
                )];
                lines.push(format!("  record: {}", record.page_id));
                if let Some(ref url) = record.url {
                    lines.push(format!("  url:    {url}"));
                }
                lines.join("\n")
            }
            Self::AlreadySynced {
                commit_sha,
                page_id,
            } => format!(
                "Commit {} is already synced (record {page_id}); nothing to do.",
                short_sha(commit_sha)
            ),
            Self::DryRun {
                commit_sha,
                task_page_id,
                request,
            } => {
                let mut lines = vec![format!(
                    "Dry run: commit {} would be linked to task {task_page_id}.",
                    short_sha(commit_sha)
                )];
                lines.push(format!("  database: {}", request.database_id));
                for (name, value) in &request.properties {
                    lines.push(format!("  {name}: {}", describe(value)));
                }
                lines.join("\n")
            }
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn describe(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Title(text) | PropertyValue::RichText(text) => {
            truncate(&text.replace('\n', " / "), 72)
        }
        PropertyValue::Date(at) => at.to_rfc3339(),
        PropertyValue::Relation(ids) => ids.join(", "),
        PropertyValue::Url(url) => url.clone(),
    }
}

/// First seven characters of a SHA, the usual abbreviated form.
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices().nth(7).map_or(sha, |(idx, _)| &sha[..idx])
}

/// Truncate a string to a maximum number of characters, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
