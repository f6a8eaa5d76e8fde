use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Redacts credentials from text before it reaches a log line or an error.
///
/// API error bodies are echoed into diagnostics, and both GitHub and Notion
/// occasionally reflect request headers back, so every body goes through
/// [`scrub_secrets`] first.
#[derive(Clone)]
pub struct SecretScrubber {
    github_token_pattern: Regex,
    notion_token_pattern: Regex,
    bearer_pattern: Regex,
    token_field_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // Classic (ghp_, gho_, ghs_, ...) and fine-grained (github_pat_) tokens
            github_token_pattern: Regex::new(r"\b(?:gh[pousr]_[A-Za-z0-9]{20,}|github_pat_[A-Za-z0-9_]{20,})")
                .expect("github token pattern is valid"),
            // Internal integration secrets: secret_... and ntn_...
            notion_token_pattern: Regex::new(r"\b(?:secret_|ntn_)[A-Za-z0-9]{20,}")
                .expect("notion token pattern is valid"),
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9\-_\.]+")
                .expect("bearer pattern is valid"),
            token_field_pattern: Regex::new(
                r#"(["']?(?:api_key|apikey|token|secret|authorization)["']?\s*[:=]\s*)["']?[A-Za-z0-9\-_\.]{16,}["']?"#,
            )
            .expect("token field pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .bearer_pattern
            .replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self
            .github_token_pattern
            .replace_all(&scrubbed, "[GITHUB_TOKEN_REDACTED]");
        let scrubbed = self
            .notion_token_pattern
            .replace_all(&scrubbed, "[NOTION_TOKEN_REDACTED]");
        self.token_field_pattern
            .replace_all(&scrubbed, "${1}[REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

/// Scrub text with a process-wide scrubber.
pub fn scrub_secrets(message: &str) -> String {
    static SCRUBBER: OnceLock<SecretScrubber> = OnceLock::new();
    SCRUBBER.get_or_init(SecretScrubber::new).scrub_message(message)
}
