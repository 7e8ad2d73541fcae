use std::fmt;
use std::str::FromStr;

use crate::backend::SearchBackend;
use crate::results::{SearchPage, SearchResult};

pub const ALL_TYPES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    Date,
    Size,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Date => "date",
            Self::Size => "size",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "date" => Ok(Self::Date),
            "size" => Ok(Self::Size),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
}

/// Parameters of one `/api/search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub search_type: String,
    pub filters: Vec<String>,
    pub sort: SortOrder,
    pub page: u32,
    pub page_token: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_type: ALL_TYPES.to_string(),
            filters: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
            page_token: None,
        }
    }

    /// `query:type:filters:sort:page`, used to drop duplicate requests.
    pub fn key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.query,
            self.search_type,
            self.filters.join(","),
            self.sort,
            self.page
        )
    }

    /// Query-string pairs in wire order. Filters are space-joined and a
    /// missing token is sent empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("type", self.search_type.clone()),
            ("filters", self.filters.join(" ")),
            ("sortBy", self.sort.to_string()),
            ("page", self.page.to_string()),
            ("pageToken", self.page_token.clone().unwrap_or_default()),
        ]
    }
}

/// What [`SearchForm::prepare`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// Nothing to search for; results were cleared.
    Cleared,
    /// Same key as the last successful search.
    Duplicate,
    Request(SearchRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Cleared,
    Skipped,
    Loaded { received: usize, total: usize },
    Failed(String),
}

/// Search form state: the current query parameters plus accumulated results.
///
/// Changing query, type, filters or sort resets pagination. Page 1 results
/// replace the list; later pages append. A failed request records the error
/// and leaves the results that were already shown.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    query: String,
    search_type: String,
    filters: Vec<String>,
    sort: SortOrder,
    view: ViewMode,
    page: u32,
    next_page_token: Option<String>,
    results: Vec<SearchResult>,
    loading: bool,
    error: Option<String>,
    last_key: Option<String>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_type: ALL_TYPES.to_string(),
            filters: Vec::new(),
            sort: SortOrder::default(),
            view: ViewMode::default(),
            page: 1,
            next_page_token: None,
            results: Vec::new(),
            loading: false,
            error: None,
            last_key: None,
        }
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search_type(&self) -> &str {
        &self.search_type
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.reset_pagination();
    }

    pub fn set_search_type(&mut self, search_type: impl Into<String>) {
        self.search_type = search_type.into();
        self.reset_pagination();
    }

    /// Adds the filter, or removes it when already present.
    pub fn toggle_filter(&mut self, filter: &str) {
        if let Some(index) = self.filters.iter().position(|existing| existing == filter) {
            self.filters.remove(index);
        } else {
            self.filters.push(filter.to_string());
        }
        self.reset_pagination();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.reset_pagination();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.reset_pagination();
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn search_key(&self) -> String {
        self.request().key()
    }

    pub fn request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            search_type: self.search_type.clone(),
            filters: self.filters.clone(),
            sort: self.sort,
            page: self.page,
            page_token: self.next_page_token.clone(),
        }
    }

    /// Decides whether a request is needed and marks the form loading if so.
    pub fn prepare(&mut self) -> SearchStep {
        if self.query.is_empty() && self.filters.is_empty() {
            self.results.clear();
            self.loading = false;
            return SearchStep::Cleared;
        }

        let request = self.request();
        if self.last_key.as_deref() == Some(request.key().as_str()) {
            return SearchStep::Duplicate;
        }

        self.loading = true;
        self.error = None;
        SearchStep::Request(request)
    }

    /// Applies a successful response to `request`.
    pub fn apply_page(&mut self, request: &SearchRequest, page: SearchPage) -> usize {
        let received = page.results.len();
        if request.page <= 1 {
            self.results = page.results;
        } else {
            self.results.extend(page.results);
        }
        self.next_page_token = page.next_page_token.filter(|token| !token.is_empty());
        self.loading = false;
        self.last_key = Some(request.key());
        received
    }

    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Runs one search round against `backend`.
    pub async fn perform(&mut self, backend: &dyn SearchBackend) -> SearchOutcome {
        let request = match self.prepare() {
            SearchStep::Cleared => return SearchOutcome::Cleared,
            SearchStep::Duplicate => return SearchOutcome::Skipped,
            SearchStep::Request(request) => request,
        };

        match backend.search(&request).await {
            Ok(page) => {
                let received = self.apply_page(&request, page);
                tracing::debug!(key = %request.key(), received, "search page applied");
                SearchOutcome::Loaded {
                    received,
                    total: self.results.len(),
                }
            }
            Err(error) => {
                let message = error.user_message();
                tracing::warn!(key = %request.key(), %error, "search failed");
                self.apply_failure(message.clone());
                SearchOutcome::Failed(message)
            }
        }
    }

    fn reset_pagination(&mut self) {
        self.page = 1;
        self.next_page_token = None;
    }
}
