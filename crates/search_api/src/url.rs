/// Default base URL of the search backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4400";

pub const SEARCH_PATH: &str = "/api/search";
pub const SUGGESTIONS_PATH: &str = "/api/suggestions";

/// Trims whitespace and trailing slashes; blank input falls back to
/// [`DEFAULT_BACKEND_URL`]. A trailing `/api` is dropped so both
/// `http://host` and `http://host/api` resolve to the same endpoints.
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_BACKEND_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .to_string()
}

pub fn search_endpoint(base_url: &str) -> String {
    format!("{}{SEARCH_PATH}", normalize_base_url(base_url))
}

pub fn suggestions_endpoint(base_url: &str) -> String {
    format!("{}{SUGGESTIONS_PATH}", normalize_base_url(base_url))
}
