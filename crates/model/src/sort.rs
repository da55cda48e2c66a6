use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordering requested by a view.
///
/// The set is closed: any unrecognized name resolves to [`SortKey::UpdatedDesc`],
/// including names read back from persisted filters written by other versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
	/// Most recently updated first.
	#[default]
	UpdatedDesc,
	/// Title, A to Z.
	TitleAsc,
	/// Highest priority first.
	PriorityDesc,
}

impl SortKey {
	/// Every sort key, in menu order.
	pub const ALL: [SortKey; 3] = [SortKey::UpdatedDesc, SortKey::TitleAsc, SortKey::PriorityDesc];

	/// Resolves a sort key name, falling back to [`SortKey::UpdatedDesc`].
	pub fn parse(name: &str) -> Self {
		match name {
			"title_asc" => Self::TitleAsc,
			"priority_desc" => Self::PriorityDesc,
			_ => Self::UpdatedDesc,
		}
	}

	/// Returns the wire name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::UpdatedDesc => "updated_desc",
			Self::TitleAsc => "title_asc",
			Self::PriorityDesc => "priority_desc",
		}
	}
}

impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<String> for SortKey {
	fn from(value: String) -> Self {
		Self::parse(&value)
	}
}

impl From<&str> for SortKey {
	fn from(value: &str) -> Self {
		Self::parse(value)
	}
}

impl From<SortKey> for String {
	fn from(value: SortKey) -> Self {
		value.as_str().to_string()
	}
}
