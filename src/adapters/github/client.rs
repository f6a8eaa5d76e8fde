//! GitHub HTTP client with rate limiting.
//!
//! Wraps the GitHub REST API v3 commit endpoint. Includes a token-bucket
//! rate limiter sized to the 5 000 req/hour authenticated API limit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::adapters::rate_limiter::RateLimiter;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CommitRef, GitHubConfig, RawCommit};
use crate::domain::ports::CommitSource;
use crate::infrastructure::logging::scrub_secrets;

use super::models::GitHubCommitResponse;

/// Default base URL for the GitHub REST API v3.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// REST API version pinned for every request.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// HTTP client for the GitHub REST API v3.
///
/// Network failures map to [`DomainError::ExecutionFailed`]; non-2xx
/// responses map to [`DomainError::ApiError`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    /// GitHub personal access token or Actions token.
    token: String,
    /// API base URL without a trailing slash.
    api_base: String,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Create a client against a custom API base (GitHub Enterprise, tests).
    pub fn with_base_url(token: String, api_base: impl Into<String>) -> Self {
        let rate_limiter = RateLimiter::new("github", 5_000, Duration::from_secs(3_600));
        Self {
            http: Client::new(),
            token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    pub fn from_config(config: &GitHubConfig) -> Self {
        Self::with_base_url(config.token.clone(), config.api_base.as_str())
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(
        &self,
        method: reqwest::Method,
        url: &str,
    ) -> reqwest::RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", "notion-commit-sync")
    }

    /// Fetch a single commit.
    ///
    /// `reference` may be a SHA or a ref path such as `heads/main`.
    pub async fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> DomainResult<GitHubCommitResponse> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_base, owner, repo, reference
        );

        let resp = self
            .rate_limited_request(reqwest::Method::GET, &url)
            .await
            .send()
            .await
            .map_err(|e| {
                DomainError::ExecutionFailed(format!("GitHub get_commit request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::ApiError {
                service: "GitHub",
                status: status.as_u16(),
                body: scrub_secrets(&body),
            });
        }

        resp.json::<GitHubCommitResponse>().await.map_err(|e| {
            DomainError::SerializationError(format!("GitHub get_commit parse failed: {e}"))
        })
    }
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn fetch_commit(&self, reference: &CommitRef) -> DomainResult<RawCommit> {
        tracing::debug!(commit = %reference, "GitHub: fetching commit");
        let resp = self
            .get_commit(&reference.owner, &reference.repo, &reference.reference)
            .await?;
        Ok(resp.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = GitHubClient::new("ghp_test_token".to_string());
        assert_eq!(client.token, "ghp_test_token");
        assert_eq!(client.api_base, GITHUB_API_BASE);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_base_url("t".to_string(), "https://ghe.example.com/api/v3/");
        assert_eq!(client.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_from_config_uses_configured_base() {
        let config = GitHubConfig {
            token: "tok".to_string(),
            api_base: "http://127.0.0.1:9999".to_string(),
            ..Default::default()
        };
        let client = GitHubClient::from_config(&config);
        assert_eq!(client.api_base, "http://127.0.0.1:9999");
        assert_eq!(client.token, "tok");
    }
}
