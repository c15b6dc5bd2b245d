//! Browser `localStorage`-based storage implementation for WASM targets.
//!
//! `localStorage` is synchronous and origin-scoped, which matches the
//! workbench's single-tab ownership model: writes are immediately durable
//! and the last write wins. Values are stored as JSON strings under keys
//! namespaced by the [`StorageConfig`].

use super::{KeyValueStore, StorageConfig, StorageError};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Browser `localStorage`-backed key-value store.
#[derive(Clone)]
pub struct LocalStorageStore {
    config: StorageConfig,
}

impl LocalStorageStore {
    /// Creates a new store with the given configuration.
    ///
    /// The browser storage area is resolved lazily on each operation; a
    /// missing window or disabled storage surfaces as `Unavailable`.
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe_js_error(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn put<T: Serialize + 'static>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.storage()?
            .set_item(&self.config.scoped_key(key), &json)
            .map_err(|e| StorageError::AccessFailed(describe_js_error(&e)))
    }

    async fn get<T: DeserializeOwned + 'static>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let item = self
            .storage()?
            .get_item(&self.config.scoped_key(key))
            .map_err(|e| StorageError::AccessFailed(describe_js_error(&e)))?;
        match item {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.config.scoped_key(key))
            .map_err(|e| StorageError::AccessFailed(describe_js_error(&e)))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let storage = self.storage()?;
        let prefix = self.config.scoped_key("");

        // Collect matching keys first; removing while iterating shifts indices.
        let length = storage
            .length()
            .map_err(|e| StorageError::AccessFailed(describe_js_error(&e)))?;
        let mut matching = Vec::new();
        for i in 0..length {
            if let Ok(Some(key)) = storage.key(i) {
                if key.starts_with(&prefix) {
                    matching.push(key);
                }
            }
        }

        for key in matching {
            storage
                .remove_item(&key)
                .map_err(|e| StorageError::AccessFailed(describe_js_error(&e)))?;
        }
        Ok(())
    }
}

fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
