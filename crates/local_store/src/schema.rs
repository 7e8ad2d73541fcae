use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LocalStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored as camelCase JSON under `user-preferences`. Fields missing from an
/// older record take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub safe_search: bool,
    pub search_suggestions: bool,
    pub save_history: bool,
    pub theme: Theme,
    pub compact_view: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            safe_search: true,
            search_suggestions: true,
            save_history: true,
            theme: Theme::System,
            compact_view: false,
        }
    }
}

impl UserPreferences {
    pub const NAMES: [&'static str; 5] = [
        "safeSearch",
        "searchSuggestions",
        "saveHistory",
        "theme",
        "compactView",
    ];

    /// Updates one preference by its stored name (`saveHistory`) or the
    /// snake_case spelling (`save_history`).
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), LocalStoreError> {
        let invalid = || LocalStoreError::InvalidPreferenceValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match normalize_name(name).as_str() {
            "safesearch" => self.safe_search = parse_bool(value).ok_or_else(invalid)?,
            "searchsuggestions" => {
                self.search_suggestions = parse_bool(value).ok_or_else(invalid)?
            }
            "savehistory" => self.save_history = parse_bool(value).ok_or_else(invalid)?,
            "compactview" => self.compact_view = parse_bool(value).ok_or_else(invalid)?,
            "theme" => self.theme = value.parse().map_err(|()| invalid())?,
            _ => {
                return Err(LocalStoreError::UnknownPreference {
                    name: name.to_string(),
                })
            }
        }

        Ok(())
    }

    /// `(name, value)` pairs in [`Self::NAMES`] order.
    pub fn entries(&self) -> [(&'static str, String); 5] {
        [
            (Self::NAMES[0], self.safe_search.to_string()),
            (Self::NAMES[1], self.search_suggestions.to_string()),
            (Self::NAMES[2], self.save_history.to_string()),
            (Self::NAMES[3], self.theme.to_string()),
            (Self::NAMES[4], self.compact_view.to_string()),
        ]
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
