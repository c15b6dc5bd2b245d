//! Generic storage abstraction for persistent report data.
//!
//! This module provides a platform-agnostic interface for key-value storage.
//! On WASM targets, it uses the browser's `localStorage` for persistence
//! (scoped to the page origin, surviving reloads). On native targets, it
//! provides a shared in-memory implementation used for development and as
//! the test double for the persistence reconciler.
//!
//! The durable layout is four logical keys, each holding one serialized
//! collection (see `data::store`). The reconciler receives a store handle at
//! construction and never touches ambient global state directly.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// The backing store could not be opened or is unavailable.
    Unavailable(String),
    /// A read or write against the backing store failed.
    AccessFailed(String),
    /// Serialization or deserialization failed.
    SerializationError(String),
    /// An unexpected error occurred.
    Other(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::AccessFailed(msg) => write!(f, "Storage access failed: {}", msg),
            StorageError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Other(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// A generic key-value storage interface.
///
/// This trait defines the operations available for persistent storage.
/// Implementations can use different backends (localStorage, IndexedDB,
/// filesystem, etc.) while providing a consistent API.
///
/// Note: This trait does not require `Send` bounds since WASM is
/// single-threaded and JS types cannot be sent between threads.
pub trait KeyValueStore {
    /// Stores a value under the given key.
    ///
    /// If a value already exists for the key, it will be overwritten.
    fn put<T: Serialize + 'static>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = Result<(), StorageError>>;

    /// Retrieves a value by key.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get<T: DeserializeOwned + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<T>, StorageError>>;

    /// Deletes a value by key.
    ///
    /// Returns `Ok(())` even if the key didn't exist.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StorageError>>;

    /// Removes all entries belonging to this store.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>>;
}

/// Configuration for creating a storage instance.
///
/// The database and store names namespace the logical keys so multiple
/// workbench instances (or tests) on the same origin do not collide.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Name of the database (used as the key prefix on web).
    pub database_name: String,
    /// Name of the logical store within the database.
    pub store_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_name: "spellcheck-workbench".to_string(),
            store_name: "reports".to_string(),
        }
    }
}

impl StorageConfig {
    /// Creates a new configuration with the given database and store names.
    pub fn new(database_name: impl Into<String>, store_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            store_name: store_name.into(),
        }
    }

    /// The fully-qualified storage key for a logical key.
    pub fn scoped_key(&self, key: &str) -> String {
        format!("{}/{}/{}", self.database_name, self.store_name, key)
    }
}

// Native in-memory implementation for development/testing
#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    /// A simple in-memory store for native builds.
    ///
    /// Clones share the underlying map, so a "reload" can be simulated by
    /// constructing a fresh reconciler over a clone of the same handle.
    /// Data is not persisted across process restarts.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        data: Arc<RwLock<HashMap<String, String>>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStore for MemoryStore {
        async fn put<T: Serialize + 'static>(
            &self,
            key: &str,
            value: &T,
        ) -> Result<(), StorageError> {
            let json = serde_json::to_string(value)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?;
            self.data
                .write()
                .map_err(|e| StorageError::Other(e.to_string()))?
                .insert(key.to_string(), json);
            Ok(())
        }

        async fn get<T: DeserializeOwned + 'static>(
            &self,
            key: &str,
        ) -> Result<Option<T>, StorageError> {
            let data = self
                .data
                .read()
                .map_err(|e| StorageError::Other(e.to_string()))?;
            match data.get(key) {
                Some(json) => {
                    let value = serde_json::from_str(json)
                        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.data
                .write()
                .map_err(|e| StorageError::Other(e.to_string()))?
                .remove(key);
            Ok(())
        }

        async fn clear(&self) -> Result<(), StorageError> {
            self.data
                .write()
                .map_err(|e| StorageError::Other(e.to_string()))?
                .clear();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_put_get_round_trip() {
            pollster::block_on(async {
                let store = MemoryStore::new();
                store.put("numbers", &vec![1u32, 2, 3]).await.unwrap();

                let values: Option<Vec<u32>> = store.get("numbers").await.unwrap();
                assert_eq!(values, Some(vec![1, 2, 3]));
            });
        }

        #[test]
        fn test_get_missing_key_is_none() {
            pollster::block_on(async {
                let store = MemoryStore::new();
                let value: Option<String> = store.get("absent").await.unwrap();
                assert_eq!(value, None);
            });
        }

        #[test]
        fn test_clones_share_data() {
            pollster::block_on(async {
                let store = MemoryStore::new();
                let other = store.clone();
                store.put("shared", &"yes".to_string()).await.unwrap();

                let value: Option<String> = other.get("shared").await.unwrap();
                assert_eq!(value.as_deref(), Some("yes"));
            });
        }

        #[test]
        fn test_delete_and_clear() {
            pollster::block_on(async {
                let store = MemoryStore::new();
                store.put("a", &1u8).await.unwrap();
                store.put("b", &2u8).await.unwrap();

                store.delete("a").await.unwrap();
                assert_eq!(store.get::<u8>("a").await.unwrap(), None);
                assert_eq!(store.get::<u8>("b").await.unwrap(), Some(2));

                store.clear().await.unwrap();
                assert_eq!(store.get::<u8>("b").await.unwrap(), None);
            });
        }
    }
}
