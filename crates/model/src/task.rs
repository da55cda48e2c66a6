use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TaskId;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
	/// Not started.
	Open,
	/// Being worked on.
	InProgress,
	/// Waiting on something external.
	Blocked,
	/// Finished.
	Done,
}

impl TaskStatus {
	/// Returns the wire name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Open => "open",
			Self::InProgress => "in_progress",
			Self::Blocked => "blocked",
			Self::Done => "done",
		}
	}

	/// Parses a wire name.
	pub fn parse(name: &str) -> Option<Self> {
		match name {
			"open" => Some(Self::Open),
			"in_progress" => Some(Self::InProgress),
			"blocked" => Some(Self::Blocked),
			"done" => Some(Self::Done),
			_ => None,
		}
	}
}

impl fmt::Display for TaskStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A row of the `tasks` or `master_library_tasks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
	/// Row identity.
	pub id: TaskId,
	/// Display title.
	pub title: String,
	/// Long-form description, matched by free-text search alongside the title.
	#[serde(default)]
	pub description: Option<String>,
	/// Workflow state.
	pub status: TaskStatus,
	/// Free-form task category.
	#[serde(default)]
	pub task_type: Option<String>,
	/// Assigned user.
	#[serde(default)]
	pub assignee_id: Option<String>,
	/// Owning project.
	#[serde(default)]
	pub project_id: Option<String>,
	/// Priority; higher is more urgent.
	#[serde(default)]
	pub priority: u8,
	/// Archived rows are hidden unless a view asks for them.
	#[serde(default)]
	pub is_archived: bool,
	/// Last modification time.
	pub updated_at: DateTime<Utc>,
}

/// A row a view can page through and answer membership questions about.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
	/// Returns the row identity.
	fn id(&self) -> &TaskId;
}

impl Record for TaskRecord {
	fn id(&self) -> &TaskId {
		&self.id
	}
}
