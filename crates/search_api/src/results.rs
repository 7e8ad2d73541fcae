use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Document,
    Image,
    Video,
    Audio,
}

impl ResultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One search hit as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub preview: String,
    /// Human size such as `"2.5 MB"`.
    pub size: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl SearchResult {
    /// Leading number of [`Self::size`], ignoring the unit.
    pub fn size_value(&self) -> Option<f64> {
        leading_number(&self.size)
    }
}

/// Body of a successful `/api/search` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

pub(crate) fn leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(index, ch)| !(ch.is_ascii_digit() || *ch == '.' || (*index == 0 && *ch == '-')))
        .map_or(trimmed.len(), |(index, _)| index);
    trimmed[..end].parse().ok()
}
