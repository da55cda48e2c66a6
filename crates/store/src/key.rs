//! Caller-scoped storage keys.

use std::fmt;

/// Identity segment used when no caller identity is known.
pub const ANONYMOUS: &str = "anon";

/// A storage key scoped by namespace, view kind and caller identity.
///
/// Renders as `<namespace>.<view>.<identity>`, e.g. `sdg.filters.search.anon`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
	/// Builds the key for `view` under `namespace`, falling back to
	/// [`ANONYMOUS`] when `identity` is absent or blank.
	pub fn new(namespace: &str, view: &str, identity: Option<&str>) -> Self {
		let identity = identity.map(str::trim).filter(|id| !id.is_empty()).unwrap_or(ANONYMOUS);
		Self(format!("{namespace}.{view}.{identity}"))
	}

	/// Returns the rendered key.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for StorageKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for StorageKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_scoped_key() {
		assert_eq!(StorageKey::new("sdg.filters", "search", Some("42")).as_str(), "sdg.filters.search.42");
		assert_eq!(StorageKey::new("sdg.filters", "masterlib", None).as_str(), "sdg.filters.masterlib.anon");
	}

	#[test]
	fn blank_identity_is_anonymous() {
		assert_eq!(StorageKey::new("ns", "search", Some("  ")).as_str(), "ns.search.anon");
	}

	#[test]
	fn views_never_share_a_key() {
		assert_ne!(StorageKey::new("ns", "search", Some("u")), StorageKey::new("ns", "masterlib", Some("u")));
	}
}
