//! Directory-backed key-value store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, Result, StoreError};

const EXTENSION: &str = "json";

/// [`KeyValueStore`] keeping one file per key under a directory.
///
/// Writes go to a sibling temporary file that is renamed over the target, so a
/// reader sees either the previous record or the new one, never a torn write.
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
	dir: PathBuf,
}

impl FileStore {
	/// Creates a store rooted at `dir`.
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Returns the root directory.
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Returns the file backing `key`.
	///
	/// The key is percent-encoded into a single file name, so separators and
	/// other reserved characters in an identity stay inside the directory.
	///
	/// # Errors
	///
	/// Returns [`StoreError::InvalidKey`] for the empty key.
	pub fn path_for(&self, key: &str) -> Result<PathBuf> {
		if key.is_empty() {
			return Err(StoreError::InvalidKey(key.to_string()));
		}
		Ok(self.dir.join(format!("{}.{EXTENSION}", urlencoding::encode(key))))
	}

	fn ensure_dir(&self) -> Result<()> {
		fs::create_dir_all(&self.dir).map_err(|error| StoreError::Io {
			path: self.dir.clone(),
			error,
		})
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		let path = self.path_for(key)?;
		match fs::read_to_string(&path) {
			Ok(contents) => Ok(Some(contents)),
			Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
			Err(error) => Err(StoreError::Io { path, error }),
		}
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		let path = self.path_for(key)?;
		self.ensure_dir()?;

		let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
		let write = || -> std::io::Result<()> {
			let mut file = fs::File::create(&tmp)?;
			file.write_all(value.as_bytes())?;
			file.sync_all()
		};
		if let Err(error) = write() {
			let _ = fs::remove_file(&tmp);
			return Err(StoreError::Io { path: tmp, error });
		}

		fs::rename(&tmp, &path).map_err(|error| StoreError::Io { path: path.clone(), error })?;
		tracing::trace!(path = %path.display(), "stored record");
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		let path = self.path_for(key)?;
		match fs::remove_file(&path) {
			Ok(()) => {
				tracing::trace!(path = %path.display(), "removed record");
				Ok(())
			}
			Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
			Err(error) => Err(StoreError::Io { path, error }),
		}
	}
}
