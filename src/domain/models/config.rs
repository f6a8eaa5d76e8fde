use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::commit::CommitRef;
use super::task_token::MatchStrategy;

/// Main configuration structure for a sync run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Source-control host settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Document store settings
    #[serde(default)]
    pub notion: NotionConfig,

    /// Task matching settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Property names of the commit record
    #[serde(default)]
    pub record: RecordConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Build the commit record but do not create it
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// The commit this run processes.
    pub fn commit_ref(&self) -> CommitRef {
        CommitRef::new(
            &self.github.owner,
            &self.github.repo,
            self.github.resolved_ref(),
        )
    }
}

/// GitHub configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Token used for the commit fetch
    #[serde(default)]
    pub token: String,

    /// Repository owner
    #[serde(default)]
    pub owner: String,

    /// Repository name
    #[serde(default)]
    pub repo: String,

    /// Branch whose head is synced when no commit ref is given
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Explicit commit SHA or ref path
    #[serde(default)]
    pub commit_ref: Option<String>,

    /// REST API base URL
    #[serde(default = "default_github_api_base")]
    pub api_base: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

impl GitHubConfig {
    /// The explicit commit ref, or the head of the configured branch.
    pub fn resolved_ref(&self) -> String {
        match self.commit_ref.as_deref().map(str::trim) {
            Some(reference) if !reference.is_empty() => reference.to_string(),
            _ => format!("heads/{}", self.branch),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner: String::new(),
            repo: String::new(),
            branch: default_branch(),
            commit_ref: None,
            api_base: default_github_api_base(),
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &redacted(&self.token))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("commit_ref", &self.commit_ref)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Notion configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotionConfig {
    /// Integration token
    #[serde(default)]
    pub token: String,

    /// Database that receives commit records
    #[serde(default)]
    pub sync_database: String,

    /// Database holding the tasks commits link to
    #[serde(default)]
    pub tasks_database: String,

    /// REST API base URL
    #[serde(default = "default_notion_api_base")]
    pub api_base: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Client-side request budget
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_notion_api_base() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

const fn default_requests_per_second() -> u32 {
    3
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            sync_database: String::new(),
            tasks_database: String::new(),
            api_base: default_notion_api_base(),
            notion_version: default_notion_version(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &redacted(&self.token))
            .field("sync_database", &self.sync_database)
            .field("tasks_database", &self.tasks_database)
            .field("api_base", &self.api_base)
            .field("notion_version", &self.notion_version)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

const fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "[REDACTED]"
    }
}

/// Task matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchingConfig {
    /// opaque or numeric
    #[serde(default)]
    pub strategy: MatchStrategy,

    /// Number property compared under the numeric strategy
    #[serde(default = "default_id_property")]
    pub id_property: String,
}

fn default_id_property() -> String {
    "ID".to_string()
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            id_property: default_id_property(),
        }
    }
}

/// Property names used on the commit record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordConfig {
    #[serde(default = "default_title_property")]
    pub title_property: String,

    #[serde(default = "default_description_property")]
    pub description_property: String,

    #[serde(default = "default_date_property")]
    pub date_property: String,

    #[serde(default = "default_committer_property")]
    pub committer_property: String,

    /// Relation property pointing at the task
    #[serde(default = "default_task_property")]
    pub task_property: String,

    /// URL property for the commit link; `None` leaves the link off
    #[serde(default = "default_url_property")]
    pub url_property: Option<String>,

    /// Rich text property holding the commit SHA; enables the duplicate check
    #[serde(default)]
    pub commit_property: Option<String>,

    /// Emoji icon for created records
    #[serde(default)]
    pub icon: Option<String>,
}

fn default_title_property() -> String {
    "Title".to_string()
}

fn default_description_property() -> String {
    "Description".to_string()
}

fn default_date_property() -> String {
    "Date".to_string()
}

fn default_committer_property() -> String {
    "Committed by".to_string()
}

fn default_task_property() -> String {
    "Task".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_url_property() -> Option<String> {
    Some("URL".to_string())
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            title_property: default_title_property(),
            description_property: default_description_property(),
            date_property: default_date_property(),
            committer_property: default_committer_property(),
            task_property: default_task_property(),
            url_property: default_url_property(),
            commit_property: None,
            icon: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for an additional JSON log file
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_ref_defaults_to_branch_head() {
        let github = GitHubConfig::default();
        assert_eq!(github.resolved_ref(), "heads/main");

        let github = GitHubConfig {
            branch: "develop".to_string(),
            ..Default::default()
        };
        assert_eq!(github.resolved_ref(), "heads/develop");
    }

    #[test]
    fn test_resolved_ref_prefers_explicit_ref() {
        let github = GitHubConfig {
            commit_ref: Some("4f2a9c1".to_string()),
            ..Default::default()
        };
        assert_eq!(github.resolved_ref(), "4f2a9c1");
    }

    #[test]
    fn test_blank_commit_ref_falls_back_to_branch() {
        // Actions passes unset optional inputs as empty strings.
        let github = GitHubConfig {
            commit_ref: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(github.resolved_ref(), "heads/main");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = Config {
            github: GitHubConfig {
                token: "ghp_supersecret".to_string(),
                ..Default::default()
            },
            notion: NotionConfig {
                token: "secret_notionkey".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_supersecret"));
        assert!(!debug.contains("secret_notionkey"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_record_defaults_match_database_columns() {
        let record = RecordConfig::default();
        assert_eq!(record.title_property, "Title");
        assert_eq!(record.committer_property, "Committed by");
        assert_eq!(record.url_property.as_deref(), Some("URL"));
        assert!(record.commit_property.is_none());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
github:
  owner: org
  repo: app
  branch: trunk
notion:
  sync_database: db-commits
  tasks_database: db-tasks
matching:
  strategy: numeric
  id_property: Ticket
record:
  url_property: null
  commit_property: SHA
  icon: 🔨
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.github.owner, "org");
        assert_eq!(config.github.resolved_ref(), "heads/trunk");
        assert_eq!(config.matching.strategy, MatchStrategy::Numeric);
        assert_eq!(config.matching.id_property, "Ticket");
        assert!(config.record.url_property.is_none());
        assert_eq!(config.record.commit_property.as_deref(), Some("SHA"));
        assert_eq!(config.record.title_property, "Title");
        assert_eq!(config.notion.notion_version, "2022-06-28");
    }
}
