//! Durable per-profile key-value storage for the Akademi client.
//!
//! The web build keeps its state in browser `localStorage`; the desktop
//! client keeps the same string-to-string map in a JSON file under the
//! platform data directory. Both sit behind [`ProfileStore`] so auth and
//! device identity never care which one they run on.
//!
//! Keys are flat strings (`sa_device_id_v1`, `sa_session_data`, ...); values
//! are opaque strings, with any structure serialized by the caller.

mod error;
mod file;
mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// A string-to-string store scoped to one user profile.
///
/// Implementations are safe to share across threads but offer no cross
/// process locking; concurrent writers get last-write-wins, exactly as two
/// browser tabs sharing `localStorage` would.
pub trait ProfileStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
