//! Process-local key-value store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::{KeyValueStore, Result};

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store pre-populated with `entries`.
	pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
		Self {
			entries: RwLock::new(entries),
		}
	}

	/// Returns true if `key` has a stored value.
	pub fn contains(&self, key: &str) -> bool {
		self.entries.read().contains_key(key)
	}

	/// Returns the number of stored keys.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns true if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(self.entries.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		self.entries.write().insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.entries.write().remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn remove_deletes_rather_than_blanks() {
		let store = MemoryStore::with_entries([("k", "v")]);
		assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

		store.remove("k").unwrap();
		assert_eq!(store.get("k").unwrap(), None);
		assert!(!store.contains("k"));
		assert!(store.is_empty());
	}

	#[test]
	fn removing_missing_key_succeeds() {
		let store = MemoryStore::new();
		assert!(store.remove("missing").is_ok());
	}
}
