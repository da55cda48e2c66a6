use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a task row.
///
/// Both collections share the identity space, so a library membership check
/// can be asked about any task the search view returned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
	/// Wraps an identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for TaskId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for TaskId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for TaskId {
	fn from(value: String) -> Self {
		Self(value)
	}
}
