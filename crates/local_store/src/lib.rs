mod error;
mod paths;
mod schema;
mod state;
mod store;

pub use error::LocalStoreError;
pub use paths::{
    key_file_name, store_root, RECENT_SEARCHES_KEY, SAVED_SEARCHES_KEY, USER_PREFERENCES_KEY,
};
pub use schema::{Theme, UserPreferences};
pub use state::{LocalStore, MAX_RECENT_SEARCHES};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
