//! Backend-neutral query plans.
//!
//! A [`QueryPlan`] is what a binding hands to its [`QueryBackend`](crate::QueryBackend):
//! the collection, a conjunction of predicates, one ordering and the row range.
//! Predicate arguments are carried as structured values, so free text reaches the
//! backend exactly as the user typed it; nothing is escaped or split here.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use docket_model::SortKey;

use crate::PageRange;

/// Backend collections the views query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
	/// All tasks.
	Tasks,
	/// Curated task templates.
	MasterLibraryTasks,
}

impl Collection {
	/// Returns the collection name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Tasks => "tasks",
			Self::MasterLibraryTasks => "master_library_tasks",
		}
	}
}

impl fmt::Display for Collection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Queryable columns of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
	/// Row identity.
	Id,
	/// Title.
	Title,
	/// Description.
	Description,
	/// Workflow state.
	Status,
	/// Task category.
	TaskType,
	/// Assignee.
	AssigneeId,
	/// Project.
	ProjectId,
	/// Priority.
	Priority,
	/// Archived flag.
	IsArchived,
	/// Last modification time.
	UpdatedAt,
}

impl Column {
	/// Returns the column name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::Title => "title",
			Self::Description => "description",
			Self::Status => "status",
			Self::TaskType => "task_type",
			Self::AssigneeId => "assignee_id",
			Self::ProjectId => "project_id",
			Self::Priority => "priority",
			Self::IsArchived => "is_archived",
			Self::UpdatedAt => "updated_at",
		}
	}
}

impl fmt::Display for Column {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A predicate argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Text.
	Text(String),
	/// Integer.
	Int(i64),
	/// Boolean.
	Bool(bool),
	/// Timestamp.
	Time(DateTime<Utc>),
}

impl Value {
	/// Orders two values of the same kind; mixed kinds are unordered.
	pub fn compare(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
			(Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
			(Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
			(Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
			_ => None,
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<u8> for Value {
	fn from(value: u8) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Self::Time(value)
	}
}

/// A row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
	/// Column equals the value.
	Eq(Column, Value),
	/// Column is greater than or equal to the value.
	Gte(Column, Value),
	/// Column is less than or equal to the value.
	Lte(Column, Value),
	/// Case-insensitive `LIKE`: `%` matches any run of characters, `_` any one.
	ILike(Column, String),
	/// At least one of the nested predicates holds.
	AnyOf(Vec<Predicate>),
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
	/// Column to order by.
	pub column: Column,
	/// Ascending when true.
	pub ascending: bool,
}

impl From<SortKey> for Order {
	fn from(key: SortKey) -> Self {
		match key {
			SortKey::UpdatedDesc => Self {
				column: Column::UpdatedAt,
				ascending: false,
			},
			SortKey::TitleAsc => Self {
				column: Column::Title,
				ascending: true,
			},
			SortKey::PriorityDesc => Self {
				column: Column::Priority,
				ascending: false,
			},
		}
	}
}

/// A complete query: collection, conjunctive predicates, ordering and range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
	/// Collection to read.
	pub collection: Collection,
	/// Predicates every returned row satisfies.
	pub predicates: Vec<Predicate>,
	/// Row ordering.
	pub order: Order,
	/// Rows to return.
	pub range: PageRange,
}

impl QueryPlan {
	/// Unfiltered plan over `collection`, newest first.
	pub fn new(collection: Collection, range: PageRange) -> Self {
		Self {
			collection,
			predicates: Vec::new(),
			order: SortKey::default().into(),
			range,
		}
	}

	/// Adds a predicate.
	#[must_use]
	pub fn filter(mut self, predicate: Predicate) -> Self {
		self.predicates.push(predicate);
		self
	}

	/// Adds a predicate when `predicate` is `Some`.
	#[must_use]
	pub fn filter_opt(self, predicate: Option<Predicate>) -> Self {
		match predicate {
			Some(predicate) => self.filter(predicate),
			None => self,
		}
	}

	/// Sets the ordering.
	#[must_use]
	pub fn order_by(mut self, order: impl Into<Order>) -> Self {
		self.order = order.into();
		self
	}

	/// Returns the top-level predicates that constrain `column` directly.
	pub fn predicates_on(&self, column: Column) -> impl Iterator<Item = &Predicate> {
		self.predicates.iter().filter(move |predicate| match predicate {
			Predicate::Eq(c, _) | Predicate::Gte(c, _) | Predicate::Lte(c, _) | Predicate::ILike(c, _) => *c == column,
			Predicate::AnyOf(_) => false,
		})
	}
}

/// Wraps `text` as a substring `LIKE` pattern.
pub(crate) fn contains_pattern(text: &str) -> String {
	format!("%{text}%")
}
