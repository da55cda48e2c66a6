//! Error types for key-value persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore) adapter.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The key cannot be mapped onto the storage medium.
	#[error("invalid storage key {0:?}")]
	InvalidKey(String),

	/// Reading or writing the backing file failed.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// File the operation touched.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;
