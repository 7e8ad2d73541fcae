//! Client and form state for the search backend that sits next to the feed.
//!
//! [`SearchApiClient`] talks to `/api/search` and `/api/suggestions`;
//! [`LocalIndex`] answers the same [`SearchBackend`] calls from memory.
//! [`SearchForm`] owns query parameters, pagination and accumulated results
//! and is driven through [`SearchForm::perform`].

pub mod backend;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod local;
pub mod query;
pub mod results;
pub mod url;

pub use backend::SearchBackend;
pub use client::SearchApiClient;
pub use config::SearchApiConfig;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE, SUGGESTION_DEBOUNCE};
pub use error::SearchApiError;
pub use export::{results_csv, results_file_name, write_results_csv};
pub use local::{local_suggestions, LocalIndex};
pub use query::{SearchForm, SearchOutcome, SearchRequest, SearchStep, SortOrder, ViewMode};
pub use results::{ResultKind, SearchPage, SearchResult};
pub use url::normalize_base_url;
