//! In-memory search index for offline use and demos.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::backend::SearchBackend;
use crate::error::SearchApiError;
use crate::query::{SearchRequest, SortOrder, ALL_TYPES};
use crate::results::{ResultKind, SearchPage, SearchResult};

pub const SIZE_FILTER_PREFIX: &str = "Size:";

const COMMON_QUERIES: [&str; 8] = [
    "research papers",
    "data visualization",
    "machine learning",
    "artificial intelligence",
    "neural networks",
    "deep learning",
    "computer vision",
    "natural language processing",
];

const LOCAL_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct LocalIndex {
    entries: Vec<SearchResult>,
}

impl LocalIndex {
    pub fn new(entries: Vec<SearchResult>) -> Self {
        Self { entries }
    }

    /// Three sample entries dated 2, 24 and 48 hours before `now`.
    pub fn sample(now: OffsetDateTime) -> Self {
        let entry = |id: &str,
                     kind: ResultKind,
                     title: &str,
                     size: &str,
                     age: Duration,
                     content: Option<&str>,
                     metadata: &[(&str, &str)]| SearchResult {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            preview: "/placeholder.svg?height=200&width=200".to_string(),
            size: size.to_string(),
            date: rfc3339(now - age),
            url: "#".to_string(),
            content: content.map(str::to_string),
            metadata: metadata
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
        };

        Self::new(vec![
            entry(
                "1",
                ResultKind::Document,
                "Advanced AI Research Paper.pdf",
                "2.5 MB",
                Duration::hours(2),
                Some("This research paper discusses advanced AI techniques..."),
                &[("author", "Dr. Smith"), ("pages", "42"), ("format", "PDF")],
            ),
            entry(
                "2",
                ResultKind::Image,
                "Data Visualization Chart.png",
                "1.8 MB",
                Duration::hours(24),
                None,
                &[("dimensions", "1920x1080"), ("format", "PNG")],
            ),
            entry(
                "3",
                ResultKind::Video,
                "Machine Learning Tutorial.mp4",
                "45.2 MB",
                Duration::hours(48),
                None,
                &[("duration", "15:30"), ("resolution", "1080p")],
            ),
        ])
    }

    pub fn entries(&self) -> &[SearchResult] {
        &self.entries
    }

    /// Every whitespace-separated term must appear (case-insensitively) in the
    /// title, content or a metadata value. A result passes the filters when
    /// any one filter accepts it.
    pub fn search(&self, query: &str, filters: &[String], sort: SortOrder) -> Vec<SearchResult> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .filter(|result| terms.iter().all(|term| matches_term(result, term)))
            .filter(|result| {
                filters.is_empty() || filters.iter().any(|filter| matches_filter(result, filter))
            })
            .cloned()
            .collect();

        match sort {
            SortOrder::Date => {
                results.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)))
            }
            SortOrder::Size => results.sort_by(|a, b| {
                let a = a.size_value().unwrap_or(0.0);
                let b = b.size_value().unwrap_or(0.0);
                b.partial_cmp(&a).unwrap_or(Ordering::Equal)
            }),
            SortOrder::Relevance => {}
        }

        results
    }
}

#[async_trait]
impl SearchBackend for LocalIndex {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchApiError> {
        if request.page > 1 {
            return Ok(SearchPage::default());
        }

        let results = LocalIndex::search(self, &request.query, &request.filters, request.sort)
            .into_iter()
            .filter(|result| {
                request.search_type == ALL_TYPES || result.kind.as_str() == request.search_type
            })
            .collect();
        Ok(SearchPage {
            results,
            next_page_token: None,
        })
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchApiError> {
        Ok(local_suggestions(query))
    }
}

/// Common queries containing `query`, first letter capitalised, at most five.
pub fn local_suggestions(query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    COMMON_QUERIES
        .iter()
        .filter(|candidate| candidate.contains(needle.as_str()))
        .map(|candidate| capitalize(candidate))
        .take(LOCAL_SUGGESTION_LIMIT)
        .collect()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn matches_term(result: &SearchResult, term: &str) -> bool {
    result.title.to_lowercase().contains(term)
        || result
            .content
            .as_deref()
            .is_some_and(|content| content.to_lowercase().contains(term))
        || result
            .metadata
            .values()
            .any(|value| value.to_lowercase().contains(term))
}

fn matches_filter(result: &SearchResult, filter: &str) -> bool {
    if let Some(limit) = filter.strip_prefix(SIZE_FILTER_PREFIX) {
        return match (leading_digits(limit), result.size_value()) {
            (Some(limit), Some(size)) => size <= limit as f64,
            _ => false,
        };
    }

    result.kind.as_str().eq_ignore_ascii_case(filter)
        || result
            .date
            .get(..10)
            .is_some_and(|day| filter.contains(day))
}

/// Whole number at the start of `value`; `"10.5MB"` reads as 10.
fn leading_digits(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

fn parse_date(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok()
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}
