//! In-memory [`QueryBackend`] over fixture tables.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use docket_model::TaskRecord;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{Collection, Column, Order, Predicate, QueryBackend, QueryError, QueryPlan, RawPage, Result, Value};

/// Tables loadable into a [`MemoryBackend`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
	/// Rows of the `tasks` collection.
	pub tasks: Vec<TaskRecord>,
	/// Rows of the `master_library_tasks` collection.
	pub master_library_tasks: Vec<TaskRecord>,
}

/// Evaluates [`QueryPlan`]s over in-memory tables.
///
/// Rows are ordered by the plan's order column with ties broken by ascending
/// id, so pages are stable across calls.
#[derive(Debug, Default)]
pub struct MemoryBackend {
	tables: RwLock<HashMap<Collection, Vec<TaskRecord>>>,
}

impl MemoryBackend {
	/// Creates an empty backend.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a backend holding the fixture's tables.
	pub fn from_fixture(fixture: Fixture) -> Self {
		let mut tables = HashMap::new();
		tables.insert(Collection::Tasks, fixture.tasks);
		tables.insert(Collection::MasterLibraryTasks, fixture.master_library_tasks);
		Self {
			tables: RwLock::new(tables),
		}
	}

	/// Appends `row` to `collection`.
	pub fn insert(&self, collection: Collection, row: TaskRecord) {
		self.tables.write().entry(collection).or_default().push(row);
	}

	/// Number of rows held in `collection`.
	pub fn len(&self, collection: Collection) -> usize {
		self.tables.read().get(&collection).map_or(0, Vec::len)
	}

	/// Evaluates `plan` synchronously.
	pub fn run(&self, plan: &QueryPlan) -> RawPage {
		let tables = self.tables.read();
		let Some(rows) = tables.get(&plan.collection) else {
			return RawPage::default();
		};

		let mut matched: Vec<&TaskRecord> = rows.iter().filter(|row| plan.predicates.iter().all(|p| matches(row, p))).collect();
		matched.sort_by(|a, b| compare_rows(a, b, plan.order));

		let count = matched.len() as u64;
		let from = usize::try_from(plan.range.from).unwrap_or(usize::MAX);
		let take = usize::try_from(plan.range.limit()).unwrap_or(usize::MAX);
		let rows = matched.into_iter().skip(from).take(take).cloned().collect();

		RawPage { rows, count }
	}
}

#[async_trait]
impl QueryBackend for MemoryBackend {
	async fn execute(&self, plan: QueryPlan, cancel: &CancellationToken) -> Result<RawPage> {
		if cancel.is_cancelled() {
			return Err(QueryError::Aborted);
		}
		Ok(self.run(&plan))
	}
}

fn column_value(row: &TaskRecord, column: Column) -> Option<Value> {
	match column {
		Column::Id => Some(row.id.as_str().into()),
		Column::Title => Some(row.title.as_str().into()),
		Column::Description => row.description.as_deref().map(Value::from),
		Column::Status => Some(row.status.as_str().into()),
		Column::TaskType => row.task_type.as_deref().map(Value::from),
		Column::AssigneeId => row.assignee_id.as_deref().map(Value::from),
		Column::ProjectId => row.project_id.as_deref().map(Value::from),
		Column::Priority => Some(row.priority.into()),
		Column::IsArchived => Some(row.is_archived.into()),
		Column::UpdatedAt => Some(row.updated_at.into()),
	}
}

fn matches(row: &TaskRecord, predicate: &Predicate) -> bool {
	match predicate {
		Predicate::Eq(column, value) => column_value(row, *column).is_some_and(|v| &v == value),
		Predicate::Gte(column, value) => {
			column_value(row, *column).and_then(|v| v.compare(value)).is_some_and(Ordering::is_ge)
		}
		Predicate::Lte(column, value) => {
			column_value(row, *column).and_then(|v| v.compare(value)).is_some_and(Ordering::is_le)
		}
		Predicate::ILike(column, pattern) => match column_value(row, *column) {
			Some(Value::Text(text)) => like_match(&text, pattern),
			_ => false,
		},
		Predicate::AnyOf(alternatives) => alternatives.iter().any(|p| matches(row, p)),
	}
}

fn compare_rows(a: &TaskRecord, b: &TaskRecord, order: Order) -> Ordering {
	let left = column_value(a, order.column);
	let right = column_value(b, order.column);
	// Missing values sort before present ones.
	let primary = match (&left, &right) {
		(Some(l), Some(r)) => l.compare(r).unwrap_or(Ordering::Equal),
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	};
	let primary = if order.ascending { primary } else { primary.reverse() };
	primary.then_with(|| a.id.cmp(&b.id))
}

/// Case-insensitive SQL `LIKE`: `%` matches any run, `_` exactly one character.
fn like_match(text: &str, pattern: &str) -> bool {
	let text: Vec<char> = text.to_lowercase().chars().collect();
	let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

	let (mut t, mut p) = (0, 0);
	let mut backtrack: Option<(usize, usize)> = None;
	while t < text.len() {
		match pattern.get(p) {
			Some('%') => {
				backtrack = Some((p, t));
				p += 1;
			}
			Some(&c) if c == '_' || c == text[t] => {
				t += 1;
				p += 1;
			}
			_ => match backtrack {
				Some((star, matched)) => {
					p = star + 1;
					t = matched + 1;
					backtrack = Some((star, matched + 1));
				}
				None => return false,
			},
		}
	}
	pattern[p..].iter().all(|&c| c == '%')
}

#[cfg(test)]
mod tests;
