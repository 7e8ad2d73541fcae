use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::backend::SearchBackend;
use crate::config::{SearchApiConfig, MIN_SUGGESTION_QUERY_CHARS};
use crate::error::{parse_error_message, SearchApiError};
use crate::query::SearchRequest;
use crate::results::SearchPage;
use crate::url::{search_endpoint, suggestions_endpoint};

#[derive(Debug)]
pub struct SearchApiClient {
    http: Client,
    config: SearchApiConfig,
}

impl SearchApiClient {
    pub fn new(config: SearchApiConfig) -> Result<Self, SearchApiError> {
        if !config.base_url.trim().is_empty() && !config.base_url.contains("://") {
            return Err(SearchApiError::InvalidBaseUrl(config.base_url));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(SearchApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SearchApiConfig {
        &self.config
    }

    pub fn search_endpoint(&self) -> String {
        search_endpoint(&self.config.base_url)
    }

    pub fn suggestions_endpoint(&self) -> String {
        suggestions_endpoint(&self.config.base_url)
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchApiError> {
        let response = self
            .http
            .get(self.search_endpoint())
            .query(&request.query_pairs())
            .send()
            .await?;
        let page: SearchPage = read_json(response).await?;
        tracing::debug!(
            query = %request.query,
            page = request.page,
            results = page.results.len(),
            "search response"
        );
        Ok(page)
    }

    /// Suggestions for a partial query. Short queries return nothing without
    /// a request; responses are cut to the configured limit.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchApiError> {
        if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .get(self.suggestions_endpoint())
            .query(&[("q", query)])
            .send()
            .await?;
        let mut suggestions: Vec<String> = read_json(response).await?;
        suggestions.truncate(self.config.suggestion_limit);
        Ok(suggestions)
    }
}

#[async_trait]
impl SearchBackend for SearchApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchApiError> {
        SearchApiClient::search(self, request).await
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchApiError> {
        SearchApiClient::suggestions(self, query).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SearchApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SearchApiError::Status(status, parse_error_message(&body)));
    }

    serde_json::from_str(&body).map_err(SearchApiError::from)
}
