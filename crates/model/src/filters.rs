use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{SortKey, TaskId, TaskStatus};

/// Filter criteria a query view owns, persists and sends to its backend.
///
/// [`Default`] is the baseline: the value a fresh view starts from, the value
/// `reset` restores, and the value any field missing from a persisted record
/// falls back to. Equality is field-wise; an update that produces an equal value
/// is a no-op for the view.
pub trait Criteria: Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
	/// Storage segment for this view kind, kept distinct per view so persisted
	/// filters of different views never collide.
	const VIEW: &'static str;

	/// Baseline criteria narrowed to the single row `id`.
	fn scoped_to(id: &TaskId) -> Self;
}

/// Criteria of the generic task search view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilters {
	/// Case-insensitive substring matched against title or description.
	pub text: String,
	/// Exact workflow state.
	pub status: Option<TaskStatus>,
	/// Exact task category.
	pub task_type: Option<String>,
	/// Exact assignee.
	pub assignee_id: Option<String>,
	/// Exact project.
	pub project_id: Option<String>,
	/// Inclusive lower bound on `updated_at`.
	pub date_from: Option<DateTime<Utc>>,
	/// Inclusive upper bound on `updated_at`.
	pub date_to: Option<DateTime<Utc>>,
	/// Include archived rows.
	pub include_archived: bool,
	/// Exact priority.
	pub priority: Option<u8>,
	/// Result ordering.
	pub sort_by: SortKey,
	/// Exact row identity; only set by membership lookups, never persisted.
	#[serde(skip)]
	pub task_id: Option<TaskId>,
}

impl Criteria for TaskFilters {
	const VIEW: &'static str = "search";

	fn scoped_to(id: &TaskId) -> Self {
		Self {
			task_id: Some(id.clone()),
			include_archived: true,
			..Self::default()
		}
	}
}

/// Criteria of the master library view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryFilters {
	/// Case-insensitive substring matched against the title only.
	pub text: String,
	/// Result ordering.
	pub sort_by: SortKey,
	/// Exact row identity; only set by membership lookups, never persisted.
	#[serde(skip)]
	pub task_id: Option<TaskId>,
}

impl Criteria for LibraryFilters {
	const VIEW: &'static str = "masterlib";

	fn scoped_to(id: &TaskId) -> Self {
		Self {
			task_id: Some(id.clone()),
			..Self::default()
		}
	}
}
