//! Notion HTTP client with rate limiting.
//!
//! Wraps the three Notion API endpoints the sync uses: search, database
//! query and page creation. Notion allows an average of three requests per
//! second per integration; the client throttles itself to the configured
//! budget instead of relying on 429 responses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::adapters::rate_limiter::RateLimiter;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CreatePageRequest, NotionConfig, PageSummary, PropertyFilter};
use crate::domain::ports::DocumentStore;
use crate::infrastructure::logging::scrub_secrets;

use super::models::{
    filter_to_json, NotionCreatePage, NotionDatabaseQuery, NotionErrorBody, NotionList,
    NotionPage, NotionSearchFilter, NotionSearchRequest,
};

/// Default base URL for the Notion API.
pub const NOTION_API_BASE: &str = "https://api.notion.com";

/// Default `Notion-Version` header value.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Page size used for search and query calls (the API maximum).
const PAGE_SIZE: u32 = 100;

/// Upper bound on search result pages followed per lookup.
const MAX_SEARCH_PAGES: usize = 5;

/// HTTP client for the Notion API.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    token: String,
    api_base: String,
    notion_version: String,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl NotionClient {
    /// Create a client against the public Notion API.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, NOTION_API_BASE, NOTION_VERSION, 3)
    }

    /// Create a client with an explicit base URL, API version and budget.
    pub fn with_base_url(
        token: String,
        api_base: impl Into<String>,
        notion_version: impl Into<String>,
        requests_per_second: u32,
    ) -> Self {
        let rate_limiter =
            RateLimiter::new("notion", requests_per_second, Duration::from_secs(1));
        Self {
            http: Client::new(),
            token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            notion_version: notion_version.into(),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    pub fn from_config(config: &NotionConfig) -> Self {
        Self::with_base_url(
            config.token.clone(),
            config.api_base.as_str(),
            config.notion_version.as_str(),
            config.requests_per_second,
        )
    }

    /// Acquire a rate-limit token and send an authorized JSON POST.
    async fn post<T: Serialize + Sync>(
        &self,
        operation: &str,
        path: &str,
        body: &T,
    ) -> DomainResult<Response> {
        self.rate_limiter.lock().await.acquire().await;

        let url = format!("{}{}", self.api_base, path);
        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", &self.notion_version)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                DomainError::ExecutionFailed(format!("Notion {operation} request failed: {e}"))
            })?;

        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: Response) -> DomainError {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let body = match serde_json::from_str::<NotionErrorBody>(&text) {
            Ok(err) if !err.message.is_empty() => format!("{}: {}", err.code, err.message),
            _ => text,
        };
        DomainError::ApiError {
            service: "Notion",
            status,
            body: scrub_secrets(&body),
        }
    }

    async fn parse_list(operation: &str, resp: Response) -> DomainResult<NotionList> {
        resp.json::<NotionList>().await.map_err(|e| {
            DomainError::SerializationError(format!("Notion {operation} parse failed: {e}"))
        })
    }
}

#[async_trait]
impl DocumentStore for NotionClient {
    async fn search_pages(&self, query: &str) -> DomainResult<Vec<PageSummary>> {
        let mut pages = Vec::new();
        let mut cursor = None;

        for _ in 0..MAX_SEARCH_PAGES {
            let body = NotionSearchRequest {
                query: query.to_string(),
                filter: NotionSearchFilter::pages(),
                page_size: PAGE_SIZE,
                start_cursor: cursor.take(),
            };
            let resp = self.post("search", "/v1/search", &body).await?;
            let list = Self::parse_list("search", resp).await?;

            pages.extend(list.results.into_iter().map(PageSummary::from));
            match (list.has_more, list.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::debug!(query = %query, results = pages.len(), "Notion: search complete");
        Ok(pages)
    }

    async fn query_database(
        &self,
        database_id: &str,
        filter: &PropertyFilter,
    ) -> DomainResult<Vec<PageSummary>> {
        let body = NotionDatabaseQuery {
            filter: filter_to_json(filter),
            page_size: PAGE_SIZE,
        };
        let path = format!("/v1/databases/{database_id}/query");
        let resp = self.post("query_database", &path, &body).await?;
        let list = Self::parse_list("query_database", resp).await?;

        Ok(list.results.into_iter().map(PageSummary::from).collect())
    }

    async fn create_page(&self, request: &CreatePageRequest) -> DomainResult<PageSummary> {
        let body = NotionCreatePage::from(request);
        let resp = self.post("create_page", "/v1/pages", &body).await?;

        let page = resp.json::<NotionPage>().await.map_err(|e| {
            DomainError::SerializationError(format!("Notion create_page parse failed: {e}"))
        })?;
        Ok(page.into())
    }
}
