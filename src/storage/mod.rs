//! Storage Layer - Key-Value Substrate
//!
//! The task store persists through this interface only.
//! Implementations: browser `localStorage`, in-memory map.

mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Synchronous string key-value store
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
