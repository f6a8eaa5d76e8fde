//! CLI type definitions
//!
//! Every flag here also has a config file, environment, or action input
//! equivalent; flags win over all of them.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::models::{Config, MatchStrategy};

#[derive(Parser, Debug)]
#[command(name = "notion-commit-sync")]
#[command(about = "Link a GitHub commit to its Notion task", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a YAML config file (defaults to .commit-sync.yaml when present)
    #[arg(short, long, env = "COMMIT_SYNC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Commit ref to sync instead of the head of the configured branch
    #[arg(long = "commit-ref", value_name = "REF")]
    pub commit_ref: Option<String>,

    /// How task tokens are matched: opaque or numeric
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<MatchStrategy>,

    /// Resolve the task and build the record without creating it
    #[arg(long)]
    pub dry_run: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref reference) = self.commit_ref {
            config.github.commit_ref = Some(reference.clone());
        }
        if let Some(strategy) = self.strategy {
            config.matching.strategy = strategy;
        }
        if self.dry_run {
            config.dry_run = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_loaded_values() {
        let cli = Cli::parse_from([
            "notion-commit-sync",
            "--commit-ref",
            "abc123",
            "--strategy",
            "numeric",
            "--dry-run",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.github.commit_ref.as_deref(), Some("abc123"));
        assert_eq!(config.matching.strategy, MatchStrategy::Numeric);
        assert!(config.dry_run);
    }

    #[test]
    fn test_no_flags_keep_loaded_values() {
        let cli = Cli::parse_from(["notion-commit-sync"]);
        let mut config = Config::default();
        config.dry_run = true;
        config.github.commit_ref = Some("heads/dev".to_string());
        cli.apply_overrides(&mut config);

        assert!(config.dry_run);
        assert_eq!(config.github.commit_ref.as_deref(), Some("heads/dev"));
        assert_eq!(config.matching.strategy, MatchStrategy::Opaque);
    }
}
