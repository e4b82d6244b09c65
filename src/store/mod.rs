//! Local Store
//!
//! String key-value storage standing in for browser local storage.
//! Every page controller persists its small JSON blobs here.
//!
//! - **MemoryStore**: process-local map, used by tests and throwaway sessions
//! - **FileStore**: one JSON object file in the data directory
//!
//! Writes are last-write-wins. There is no schema versioning.

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};

/// Fixed keys shared by the page controllers
pub mod keys {
    /// Session token issued by the auth provider
    pub const SESSION_TOKEN: &str = "sb-access-token";
    /// `"light"` or `"dark"`
    pub const THEME: &str = "theme";
    /// Serialized profile record (overwritten on save)
    pub const PROFILE: &str = "edubot_profile";
    /// JSON array of feedback records (append-only)
    pub const FEEDBACK: &str = "edubot_feedback";
}

/// Key-value storage of string values
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Read and decode a JSON value
pub fn get_json<T, S>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and store a JSON value
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        let entry = Entry {
            name: "flashcards".to_string(),
            count: 3,
        };

        set_json(&store, "entry", &entry).unwrap();
        let loaded: Option<Entry> = get_json(&store, "entry").unwrap();
        assert_eq!(loaded, Some(entry));

        let missing: Option<Entry> = get_json(&store, "other").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_get_json_rejects_garbage() {
        let store = MemoryStore::new();
        store.set("entry", "{not json").unwrap();

        let result: StoreResult<Option<Entry>> = get_json(&store, "entry");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_helpers_work_through_trait_object() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        set_json(store.as_ref(), keys::FEEDBACK, &vec![1, 2, 3]).unwrap();

        let list: Option<Vec<u32>> = get_json(store.as_ref(), keys::FEEDBACK).unwrap();
        assert_eq!(list, Some(vec![1, 2, 3]));
    }
}
