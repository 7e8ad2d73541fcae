use std::sync::Mutex;

use async_trait::async_trait;
use search_api::{
    SearchApiError, SearchBackend, SearchForm, SearchOutcome, SearchPage, SearchRequest,
    SearchStep, SortOrder, ViewMode,
};

#[derive(Default)]
struct RecordingBackend {
    requests: Mutex<Vec<SearchRequest>>,
}

#[async_trait]
impl SearchBackend for RecordingBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchApiError> {
        self.requests.lock().expect("requests").push(request.clone());
        Ok(SearchPage::default())
    }

    async fn suggestions(&self, _query: &str) -> Result<Vec<String>, SearchApiError> {
        Ok(Vec::new())
    }
}

#[test]
fn search_key_joins_parameters() {
    let mut form = SearchForm::new();
    form.set_query("cats");
    form.toggle_filter("image");
    form.toggle_filter("Size:5");
    form.set_sort(SortOrder::Size);

    assert_eq!(form.search_key(), "cats:all:image,Size:5:size:1");
}

#[test]
fn parameter_changes_reset_pagination() {
    let mut form = SearchForm::new();
    form.set_query("cats");
    form.next_page();
    form.next_page();
    assert_eq!(form.page(), 3);

    form.toggle_filter("video");
    assert_eq!(form.page(), 1);

    form.next_page();
    form.set_search_type("video");
    assert_eq!(form.page(), 1);

    form.next_page();
    form.set_view(ViewMode::Compact);
    assert_eq!(form.page(), 2, "view changes keep the page");
}

#[test]
fn toggling_a_filter_twice_removes_it() {
    let mut form = SearchForm::new();
    form.toggle_filter("audio");
    form.toggle_filter("audio");
    assert!(form.filters().is_empty());
}

#[test]
fn empty_query_without_filters_clears_results() {
    let mut form = SearchForm::new();
    assert_eq!(form.prepare(), SearchStep::Cleared);
    assert!(form.results().is_empty());
    assert!(!form.is_loading());
}

#[test]
fn filters_alone_are_enough_to_search() {
    let mut form = SearchForm::new();
    form.toggle_filter("document");
    match form.prepare() {
        SearchStep::Request(request) => {
            assert_eq!(request.query, "");
            assert_eq!(request.filters, vec!["document".to_string()]);
        }
        other => panic!("expected request, got {other:?}"),
    }
    assert!(form.is_loading());
}

#[tokio::test]
async fn perform_skips_duplicate_keys_until_parameters_change() {
    let backend = RecordingBackend::default();
    let mut form = SearchForm::new();
    form.set_query("owls");

    assert!(matches!(form.perform(&backend).await, SearchOutcome::Loaded { .. }));
    assert_eq!(form.perform(&backend).await, SearchOutcome::Skipped);

    form.set_sort(SortOrder::Date);
    assert!(matches!(form.perform(&backend).await, SearchOutcome::Loaded { .. }));

    let requests = backend.requests.lock().expect("requests");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].sort, SortOrder::Date);
}

#[test]
fn reset_restores_defaults() {
    let mut form = SearchForm::new();
    form.set_query("owls");
    form.apply_failure("boom");
    form.reset();
    assert_eq!(form, SearchForm::default());
}

#[test]
fn sort_order_parses_case_insensitively() {
    assert_eq!("Date".parse::<SortOrder>(), Ok(SortOrder::Date));
    assert!("newest".parse::<SortOrder>().is_err());
}
