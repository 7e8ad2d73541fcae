use async_trait::async_trait;

use crate::error::SearchApiError;
use crate::query::SearchRequest;
use crate::results::SearchPage;

/// Anything that can answer search and suggestion queries.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchApiError>;

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchApiError>;
}
