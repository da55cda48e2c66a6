//! Configuration loading for docket.
//!
//! Configuration is written in TOML. Every key is optional:
//!
//! ```toml
//! [view]
//! page_size = 20
//! identity = "anon"
//!
//! [storage]
//! namespace = "sdg.filters"
//! dir = "/path/to/filters"
//! ```
//!
//! # Configuration Files
//!
//! docket looks for `$XDG_CONFIG_HOME/docket/docket.toml` (or the platform
//! equivalent) unless a path is given explicitly. A missing default file means
//! defaults; a missing explicit file is an error.
//!
//! Persisted filters live in `storage.dir`, defaulting to `<data dir>/docket/filters`.

pub mod error;

use std::path::{Path, PathBuf};

use docket_view::{DEFAULT_NAMESPACE, Pagination, ViewOptions};
use serde::Deserialize;

pub use error::{ConfigError, Result};

/// File name looked up in the configuration directory.
pub const FILE_NAME: &str = "docket.toml";

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// View settings.
	pub view: ViewConfig,
	/// Filter persistence settings.
	pub storage: StorageConfig,
}

/// `[view]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
	/// Rows per page.
	pub page_size: u32,
	/// Identity scoping persisted filters.
	pub identity: Option<String>,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			page_size: Pagination::DEFAULT_LIMIT,
			identity: None,
		}
	}
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
	/// Key namespace for persisted filters.
	pub namespace: String,
	/// Directory holding persisted filters.
	pub dir: Option<PathBuf>,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			namespace: DEFAULT_NAMESPACE.to_string(),
			dir: None,
		}
	}
}

impl Config {
	/// Parse a TOML string into a validated [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Load `path` when given, otherwise the default file if it exists.
	pub fn discover(path: Option<&Path>) -> Result<Self> {
		if let Some(path) = path {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => {
				tracing::debug!(path = %path.display(), "loading configuration");
				Self::load(path)
			}
			_ => Ok(Self::default()),
		}
	}

	/// Rejects values that parse but cannot be used.
	pub fn validate(&self) -> Result<()> {
		if self.view.page_size == 0 {
			return Err(ConfigError::Invalid("view.page_size must be at least 1".into()));
		}
		if self.storage.namespace.trim().is_empty() {
			return Err(ConfigError::Invalid("storage.namespace must not be empty".into()));
		}
		Ok(())
	}

	/// View construction options, with `identity` overriding the configured one.
	pub fn view_options(&self, identity: Option<&str>) -> ViewOptions {
		ViewOptions {
			limit: self.view.page_size,
			identity: identity.map(str::to_string).or_else(|| self.view.identity.clone()),
			namespace: self.storage.namespace.clone(),
		}
	}

	/// Directory holding persisted filters.
	pub fn storage_dir(&self) -> Result<PathBuf> {
		match &self.storage.dir {
			Some(dir) => Ok(dir.clone()),
			None => dirs::data_dir()
				.map(|dir| dir.join("docket").join("filters"))
				.ok_or_else(|| ConfigError::Invalid("no data directory; set storage.dir".into())),
		}
	}
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("docket").join(FILE_NAME))
}
