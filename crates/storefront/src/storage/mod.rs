//! Key-value blob storage.
//!
//! The persistence contract is deliberately small: opaque string blobs
//! under string keys, one JSON document per key. This is the local-storage
//! analog the rest of the crate is written against. Repositories read and
//! write whole documents; there is no partial update, no transaction, and
//! no cross-key consistency guarantee.
//!
//! # Persisted keys
//!
//! | Key        | Content                                   |
//! |------------|-------------------------------------------|
//! | `user`     | current session user, or absent           |
//! | `products` | full product array, seeded on first open  |
//! | `cart`     | array of cart lines                       |
//! | `orders`   | array of orders, newest first             |

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (file-backed store only).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A key contains characters the store cannot handle.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The document under a key is not valid JSON for the expected type.
    #[error("corrupt document under key {key}: {source}")]
    Corrupt {
        /// The key whose document failed to decode.
        key: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// A value could not be encoded to JSON.
    #[error("failed to encode document for key {key}: {source}")]
    Encode {
        /// The key the document was being written under.
        key: String,
        /// The underlying encode error.
        source: serde_json::Error,
    },
}

/// A key-value blob store holding one document per key.
///
/// Implementations must tolerate reads of absent keys (`Ok(None)`) and
/// removal of absent keys (`Ok(())`).
pub trait KvStore: Send + Sync {
    /// Read the blob under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the blob under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing medium fails.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the blob under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing medium fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON document under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Corrupt`] if the document does not decode as
/// `T`, or any error from the underlying store.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_owned(),
                source,
            }),
    }
}

/// Encode `value` as JSON and write it under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if the value does not serialize, or
/// any error from the underlying store.
pub fn write_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.put(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_absent_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = read_json(&store, "orders").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_json_helpers_round_trip() {
        let store = MemoryStore::new();
        write_json(&store, "cart", &vec![1u32, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = read_json(&store, "cart").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_read_json_corrupt_document() {
        let store = MemoryStore::new();
        store.put("cart", "not json").unwrap();
        let err = read_json::<Vec<u32>>(&store, "cart").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }
}
