use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON stored under key '{key}': {source}")]
    JsonParse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for key '{key}': {source}")]
    JsonSerialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("unknown preference '{name}'")]
    UnknownPreference { name: String },

    #[error("invalid value '{value}' for preference '{name}'")]
    InvalidPreferenceValue { name: String, value: String },
}

impl LocalStoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_parse(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            key: key.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_serialize(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonSerialize {
            key: key.into(),
            source,
        }
    }
}
