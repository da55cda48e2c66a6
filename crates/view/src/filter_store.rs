//! Persisted filter criteria.

use std::sync::Arc;

use docket_model::Criteria;
use docket_store::{KeyValueStore, StorageKey};
use tracing::{debug, warn};

/// Outcome of a filter update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
	/// The update produced a value equal to the current one; nothing happened.
	Unchanged,
	/// The update was committed and persisted.
	Committed,
}

impl FilterChange {
	/// Returns true for [`FilterChange::Committed`].
	pub fn is_committed(self) -> bool {
		matches!(self, Self::Committed)
	}
}

/// Owns a view's criteria and mirrors every committed change into a
/// [`KeyValueStore`] record.
///
/// Persistence is best-effort: write failures are logged and never block the
/// in-memory update.
pub struct FilterStore<C> {
	current: C,
	key: StorageKey,
	store: Arc<dyn KeyValueStore>,
}

impl<C: Criteria> FilterStore<C> {
	/// Opens the record at `key`, starting from the persisted criteria when a
	/// readable record exists and from the baseline otherwise.
	pub fn open(store: Arc<dyn KeyValueStore>, key: StorageKey) -> Self {
		let current = hydrate(store.as_ref(), &key).unwrap_or_default();
		Self { current, key, store }
	}

	/// Current criteria.
	pub fn filters(&self) -> &C {
		&self.current
	}

	/// Storage key of the persisted record.
	pub fn key(&self) -> &StorageKey {
		&self.key
	}

	/// Replaces the criteria with `next` unless it equals the current value.
	pub fn commit(&mut self, next: C) -> FilterChange {
		if next == self.current {
			return FilterChange::Unchanged;
		}
		self.current = next;
		self.save();
		FilterChange::Committed
	}

	/// Restores the baseline and deletes the persisted record.
	///
	/// The record is removed even when the criteria already equal the baseline.
	pub fn reset(&mut self) -> FilterChange {
		if let Err(error) = self.store.remove(self.key.as_str()) {
			warn!(key = %self.key, %error, "failed to remove persisted filters");
		}
		let previous = std::mem::take(&mut self.current);
		if previous == self.current {
			FilterChange::Unchanged
		} else {
			FilterChange::Committed
		}
	}

	/// Writes the current criteria to the store.
	pub fn save(&self) {
		let result = serde_json::to_string(&self.current)
			.map_err(|error| error.to_string())
			.and_then(|raw| self.store.set(self.key.as_str(), &raw).map_err(|error| error.to_string()));
		if let Err(error) = result {
			warn!(key = %self.key, %error, "failed to persist filters");
		}
	}
}

/// Reads and decodes the record at `key`.
///
/// Returns `None` when nothing is stored, the store cannot be read or the
/// record does not decode; fields missing from a decodable record take their
/// baseline values.
pub fn hydrate<C: Criteria>(store: &dyn KeyValueStore, key: &StorageKey) -> Option<C> {
	let raw = match store.get(key.as_str()) {
		Ok(raw) => raw?,
		Err(error) => {
			warn!(%key, %error, "failed to read persisted filters");
			return None;
		}
	};
	match serde_json::from_str(&raw) {
		Ok(filters) => Some(filters),
		Err(error) => {
			debug!(%key, %error, "ignoring malformed persisted filters");
			None
		}
	}
}
