use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

/// Message shown when a failed response carries no usable `message`.
pub const SEARCH_FAILED: &str = "Search failed";

#[derive(Debug)]
pub enum SearchApiError {
    InvalidBaseUrl(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    Unknown(String),
}

impl SearchApiError {
    /// Text suitable for showing to the person searching.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status(_, message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

impl fmt::Display for SearchApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SearchApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Serde(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for SearchApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Pulls `message` out of a JSON error body, falling back to [`SEARCH_FAILED`].
pub fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| SEARCH_FAILED.to_string())
}
