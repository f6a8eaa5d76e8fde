use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::MatchStrategy;

/// Default project config file, loaded when present.
pub const DEFAULT_CONFIG_FILE: &str = ".commit-sync.yaml";

/// Prefix for environment overrides, nested with `__`.
pub const ENV_PREFIX: &str = "COMMIT_SYNC_";

/// GitHub Actions inputs (exposed to the process as `INPUT_<NAME>`) and the
/// config keys they populate.
pub const ACTION_INPUTS: &[(&str, &str)] = &[
    ("SECRET_GITHUB", "github.token"),
    ("OWNER", "github.owner"),
    ("REPO", "github.repo"),
    ("BRANCH", "github.branch"),
    ("COMMIT_REF", "github.commit_ref"),
    ("NOTION_API_KEY", "notion.token"),
    ("NOTION_DATABASE", "notion.sync_database"),
    ("TASKS_DATABASE", "notion.tasks_database"),
    ("MATCH_STRATEGY", "matching.strategy"),
    ("ID_PROPERTY", "matching.id_property"),
    ("COMMIT_PROPERTY", "record.commit_property"),
    ("ICON", "record.icon"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting `{key}` (action input {input})")]
    MissingValue {
        key: &'static str,
        input: &'static str,
    },

    #[error("Property name `{0}` cannot be empty")]
    EmptyPropertyName(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid requests_per_second: {0}. Must be at least 1")]
    InvalidRequestRate(u32),

    #[error("Config file not found: {0}")]
    FileNotFound(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The YAML file at `path`, or `.commit-sync.yaml` if present
    /// 3. Environment variables (COMMIT_SYNC_* prefix, `__` for nesting)
    /// 4. GitHub Actions inputs (INPUT_* variables)
    ///
    /// The result is not validated; callers apply command-line overrides
    /// first and then call [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = match path {
            Some(explicit) if !explicit.exists() => {
                return Err(ConfigError::FileNotFound(explicit.display().to_string()).into());
            }
            Some(explicit) => explicit.to_path_buf(),
            None => DEFAULT_CONFIG_FILE.into(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(&file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        action_inputs()
            .into_iter()
            .fold(figment, |figment, (key, value)| {
                figment.merge(Serialized::default(&key, value))
            })
            .extract()
            .with_context(|| format!("Failed to load configuration (file: {})", file.display()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let required = [
            (config.github.token.as_str(), "github.token"),
            (config.github.owner.as_str(), "github.owner"),
            (config.github.repo.as_str(), "github.repo"),
            (config.notion.token.as_str(), "notion.token"),
            (config.notion.sync_database.as_str(), "notion.sync_database"),
            (config.notion.tasks_database.as_str(), "notion.tasks_database"),
        ];
        for (value, key) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue {
                    key,
                    input: input_for(key),
                });
            }
        }

        let record = &config.record;
        let property_names = [
            (record.title_property.as_str(), "record.title_property"),
            (record.description_property.as_str(), "record.description_property"),
            (record.date_property.as_str(), "record.date_property"),
            (record.committer_property.as_str(), "record.committer_property"),
            (record.task_property.as_str(), "record.task_property"),
        ];
        for (value, key) in property_names {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyPropertyName(key));
            }
        }

        if config.matching.strategy == MatchStrategy::Numeric
            && config.matching.id_property.trim().is_empty()
        {
            return Err(ConfigError::EmptyPropertyName("matching.id_property"));
        }

        if config.notion.requests_per_second == 0 {
            return Err(ConfigError::InvalidRequestRate(
                config.notion.requests_per_second,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

/// `INPUT_<NAME>` variables as `(config key, value)` pairs.
///
/// Values stay strings, so an all-digit SHA or repo name is not read as a
/// number. The runner passes every declared input, unset ones as `""`, so
/// blank values are skipped and the lower layers apply.
fn action_inputs() -> Vec<(String, String)> {
    Env::prefixed("INPUT_")
        .filter_map(|key| {
            ACTION_INPUTS
                .iter()
                .find(|(input, _)| key.as_str().eq_ignore_ascii_case(input))
                .map(|(_, path)| (*path).into())
        })
        .iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key.as_str().to_string(), value.to_string()))
        })
        .collect()
}

fn input_for(key: &str) -> &'static str {
    ACTION_INPUTS
        .iter()
        .find(|(_, path)| *path == key)
        .map_or("-", |(input, _)| input)
}
