//! Key-value persistence for view filter records.
//!
//! Views persist their criteria through the [`KeyValueStore`] trait and never see
//! the medium behind it. Two adapters ship here:
//! * [`MemoryStore`]: process-local map, used by tests and ephemeral shells
//! * [`FileStore`]: one file per key under a directory, replaced atomically

#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod key;
pub mod memory;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use key::StorageKey;
pub use memory::MemoryStore;

/// String-valued key-value storage.
///
/// A missing key and a stored value are distinguishable: [`get`](Self::get)
/// returns `Ok(None)` only when nothing is stored, and [`remove`](Self::remove)
/// deletes the key rather than blanking it.
pub trait KeyValueStore: Send + Sync {
	/// Reads the value stored under `key`.
	fn get(&self, key: &str) -> Result<Option<String>>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &str) -> Result<()>;

	/// Deletes `key`. Removing a missing key succeeds.
	fn remove(&self, key: &str) -> Result<()>;
}
