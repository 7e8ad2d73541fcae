use std::time::Duration;

use crate::url::DEFAULT_BACKEND_URL;

/// Suggestions kept from one backend response.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Queries shorter than this never hit the suggestions endpoint.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Transport configuration for search backend requests.
#[derive(Debug, Clone)]
pub struct SearchApiConfig {
    /// Base URL; endpoints are derived with [`crate::url::search_endpoint`].
    pub base_url: String,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
    pub suggestion_limit: usize,
}

impl Default for SearchApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: None,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl SearchApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }
}
