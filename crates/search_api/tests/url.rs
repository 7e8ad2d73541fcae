use search_api::normalize_base_url;
use search_api::url::{search_endpoint, suggestions_endpoint};

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(normalize_base_url("  "), "http://localhost:4400");
}

#[test]
fn trailing_slashes_and_api_suffix_are_dropped() {
    assert_eq!(normalize_base_url("http://search.local/"), "http://search.local");
    assert_eq!(normalize_base_url("http://search.local/api/"), "http://search.local");
}

#[test]
fn endpoints_append_api_paths() {
    assert_eq!(
        search_endpoint("http://search.local"),
        "http://search.local/api/search"
    );
    assert_eq!(
        suggestions_endpoint("http://search.local/api"),
        "http://search.local/api/suggestions"
    );
}
