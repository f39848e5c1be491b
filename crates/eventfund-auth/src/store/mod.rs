//! Key-value session storage.
//!
//! The guard never touches a concrete backend; it is handed an
//! `Arc<dyn SessionStore>` so tests can use [`MemoryStore`] and the CLI a
//! [`FileStore`].

pub mod file;
pub mod memory;

pub use crate::error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Process-wide string key-value storage.
pub trait SessionStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
