use std::path::{Path, PathBuf};

pub const STORE_DIR: [&str; 2] = [".thinking-feed", "storage"];

pub const RECENT_SEARCHES_KEY: &str = "recent-searches";
pub const SAVED_SEARCHES_KEY: &str = "saved-searches";
pub const USER_PREFERENCES_KEY: &str = "user-preferences";

#[must_use]
pub fn store_root(base: &Path) -> PathBuf {
    base.join(STORE_DIR[0]).join(STORE_DIR[1])
}

/// Keys map to `<key>.json`; only ASCII alphanumerics, `-` and `_` are
/// accepted so a key can never escape the store directory.
#[must_use]
pub fn key_file_name(key: &str) -> Option<String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| format!("{key}.json"))
}
