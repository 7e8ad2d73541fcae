use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::LocalStoreError;
use crate::paths::{RECENT_SEARCHES_KEY, SAVED_SEARCHES_KEY, USER_PREFERENCES_KEY};
use crate::schema::UserPreferences;
use crate::store::KeyValueStore;

pub const MAX_RECENT_SEARCHES: usize = 10;

/// Recent searches, saved searches and preferences over any
/// [`KeyValueStore`]. Missing keys read as empty lists or defaults.
#[derive(Debug)]
pub struct LocalStore<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Most recent first, at most [`MAX_RECENT_SEARCHES`].
    pub fn recent_searches(&self) -> Result<Vec<String>, LocalStoreError> {
        Ok(self.read(RECENT_SEARCHES_KEY)?.unwrap_or_default())
    }

    /// Moves `query` to the front, dropping any older copy. Blank queries are
    /// ignored.
    pub fn add_recent_search(&self, query: &str) -> Result<Vec<String>, LocalStoreError> {
        let mut searches = self.recent_searches()?;
        if query.trim().is_empty() {
            return Ok(searches);
        }

        searches.retain(|existing| existing != query);
        searches.insert(0, query.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);
        self.write(RECENT_SEARCHES_KEY, &searches)?;
        Ok(searches)
    }

    pub fn clear_recent_searches(&self) -> Result<(), LocalStoreError> {
        self.store.remove(RECENT_SEARCHES_KEY)
    }

    /// In the order they were saved.
    pub fn saved_searches(&self) -> Result<Vec<String>, LocalStoreError> {
        Ok(self.read(SAVED_SEARCHES_KEY)?.unwrap_or_default())
    }

    /// Saves `query` or removes it if already saved. Returns whether it is
    /// saved afterwards.
    pub fn toggle_saved_search(&self, query: &str) -> Result<bool, LocalStoreError> {
        let mut searches = self.saved_searches()?;
        let saved = match searches.iter().position(|existing| existing == query) {
            Some(index) => {
                searches.remove(index);
                false
            }
            None => {
                searches.push(query.to_string());
                true
            }
        };
        self.write(SAVED_SEARCHES_KEY, &searches)?;
        Ok(saved)
    }

    pub fn preferences(&self) -> Result<UserPreferences, LocalStoreError> {
        Ok(self.read(USER_PREFERENCES_KEY)?.unwrap_or_default())
    }

    pub fn set_preferences(&self, preferences: &UserPreferences) -> Result<(), LocalStoreError> {
        self.write(USER_PREFERENCES_KEY, preferences)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LocalStoreError> {
        let Some(text) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| LocalStoreError::json_parse(key, source))
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), LocalStoreError> {
        let text = serde_json::to_string(value)
            .map_err(|source| LocalStoreError::json_serialize(key, source))?;
        self.store.set(key, &text)
    }
}
