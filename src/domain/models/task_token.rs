//! Task token extraction and normalization.
//!
//! A commit title references its task through a leading bracket pair, e.g.
//! `[TASK-7] Add cache` or `[#42] Fix retry bug`. The bracket contents are the
//! [`TaskToken`]; the deployment's [`MatchStrategy`] turns it into the
//! [`TaskKey`] the task database is searched by.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::SyncError;

fn leading_bracket() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\[(.*?)\]").expect("leading bracket pattern is valid"))
}

fn digit_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// The literal contents of a title's leading bracket pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToken(String);

impl TaskToken {
    /// Extract the token from a commit title.
    ///
    /// The bracket must open the title. The match is non-greedy, so
    /// `[A] [B]` yields `A`.
    pub fn extract(title: &str) -> Result<Self, SyncError> {
        leading_bracket()
            .captures(title)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| SyncError::TokenMissing {
                title: title.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How task tokens are matched against the task database.
///
/// Chosen once per deployment; the two strategies are never mixed in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Full-text search for the bracket contents as written.
    #[default]
    Opaque,
    /// Exact equality on a numeric property, using the first number in the
    /// bracket contents.
    Numeric,
}

impl MatchStrategy {
    /// Normalize a token into the key this strategy looks tasks up by.
    ///
    /// Opaque tokens are kept verbatim, even when empty. Numeric tokens
    /// without a digit run that fits in a `u64` are rejected.
    pub fn normalize(self, token: &TaskToken) -> Result<TaskKey, SyncError> {
        match self {
            Self::Opaque => Ok(TaskKey::Opaque(token.as_str().to_string())),
            Self::Numeric => digit_run()
                .find(token.as_str())
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .map(TaskKey::Numeric)
                .ok_or_else(|| SyncError::TokenMissing {
                    title: format!("[{}]", token.as_str()),
                }),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque => f.write_str("opaque"),
            Self::Numeric => f.write_str("numeric"),
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opaque" => Ok(Self::Opaque),
            "numeric" => Ok(Self::Numeric),
            other => Err(format!(
                "Unknown match strategy '{other}'. Expected one of: opaque, numeric"
            )),
        }
    }
}

/// A normalized task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskKey {
    Opaque(String),
    Numeric(u64),
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque(s) => write!(f, "{s:?}"),
            Self::Numeric(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_for(title: &str, strategy: MatchStrategy) -> Result<TaskKey, SyncError> {
        let token = TaskToken::extract(title)?;
        strategy.normalize(&token)
    }

    #[test]
    fn test_numeric_strategy_plain_number() {
        let key = key_for("[42] Fix retry bug", MatchStrategy::Numeric).unwrap();
        assert_eq!(key, TaskKey::Numeric(42));
    }

    #[test]
    fn test_opaque_strategy_verbatim() {
        let key = key_for("[TASK-7] Add cache", MatchStrategy::Opaque).unwrap();
        assert_eq!(key, TaskKey::Opaque("TASK-7".to_string()));
    }

    #[test]
    fn test_numeric_strategy_uses_first_digit_run() {
        let key = key_for("[PRJ-12 v3] Ship it", MatchStrategy::Numeric).unwrap();
        assert_eq!(key, TaskKey::Numeric(12));
    }

    #[test]
    fn test_numeric_strategy_without_digits_is_missing() {
        let err = key_for("[TASK] Refactor", MatchStrategy::Numeric).unwrap_err();
        assert!(matches!(err, SyncError::TokenMissing { .. }));
    }

    #[test]
    fn test_numeric_strategy_overflow_is_missing() {
        let err = key_for("[99999999999999999999999] x", MatchStrategy::Numeric).unwrap_err();
        assert!(matches!(err, SyncError::TokenMissing { .. }));
    }

    #[test]
    fn test_missing_bracket() {
        let err = TaskToken::extract("Fix retry bug").unwrap_err();
        match err {
            SyncError::TokenMissing { title } => assert_eq!(title, "Fix retry bug"),
            other => panic!("Expected TokenMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_bracket_must_lead_title() {
        assert!(TaskToken::extract(" [TASK-1] indented").is_err());
        assert!(TaskToken::extract("Fix [TASK-1]").is_err());
    }

    #[test]
    fn test_non_greedy_match() {
        let token = TaskToken::extract("[A] [B] both").unwrap();
        assert_eq!(token.as_str(), "A");
    }

    #[test]
    fn test_blank_brackets_are_kept_for_opaque() {
        assert_eq!(
            key_for("[] nothing", MatchStrategy::Opaque).unwrap(),
            TaskKey::Opaque(String::new())
        );
        assert_eq!(
            key_for("[  ] nothing", MatchStrategy::Opaque).unwrap(),
            TaskKey::Opaque("  ".to_string())
        );
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("numeric".parse::<MatchStrategy>().unwrap(), MatchStrategy::Numeric);
        assert_eq!("OPAQUE".parse::<MatchStrategy>().unwrap(), MatchStrategy::Opaque);
        assert!("fuzzy".parse::<MatchStrategy>().is_err());
    }

    #[test]
    fn test_strategy_serde_lowercase() {
        let s: MatchStrategy = serde_json::from_str("\"numeric\"").unwrap();
        assert_eq!(s, MatchStrategy::Numeric);
        assert_eq!(serde_json::to_string(&MatchStrategy::Opaque).unwrap(), "\"opaque\"");
    }
}
