//! Generic task search binding.

use std::sync::Arc;

use async_trait::async_trait;
use docket_model::{TaskFilters, TaskRecord};
use tokio_util::sync::CancellationToken;

use crate::plan::contains_pattern;
use crate::{Collection, Column, PageRange, PageResult, Predicate, QueryBackend, QueryError, QueryPlan, QueryService, Result};

/// [`QueryService`] for the task search view over the `tasks` collection.
///
/// Free text matches title or description; every other set field is an exact
/// match, date bounds are inclusive on `updated_at`, and archived rows are
/// excluded unless `include_archived` is set.
#[derive(Clone)]
pub struct TaskQuery {
	backend: Arc<dyn QueryBackend>,
}

impl TaskQuery {
	/// Creates a binding executing on `backend`.
	pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
		Self { backend }
	}

	/// Translates `criteria` into a plan for `range`.
	///
	/// # Errors
	///
	/// Returns [`QueryError::Validation`] when `date_from` is after `date_to`.
	pub fn plan(criteria: &TaskFilters, range: PageRange) -> Result<QueryPlan> {
		if let (Some(from), Some(to)) = (criteria.date_from, criteria.date_to)
			&& from > to
		{
			return Err(QueryError::Validation(format!("date_from {from} is after date_to {to}")));
		}

		let text = (!criteria.text.is_empty()).then(|| {
			let pattern = contains_pattern(&criteria.text);
			Predicate::AnyOf(vec![
				Predicate::ILike(Column::Title, pattern.clone()),
				Predicate::ILike(Column::Description, pattern),
			])
		});

		let plan = QueryPlan::new(Collection::Tasks, range)
			.filter_opt(criteria.task_id.as_ref().map(|id| Predicate::Eq(Column::Id, id.as_str().into())))
			.filter_opt(criteria.status.map(|status| Predicate::Eq(Column::Status, status.as_str().into())))
			.filter_opt(criteria.task_type.clone().map(|kind| Predicate::Eq(Column::TaskType, kind.into())))
			.filter_opt(criteria.assignee_id.clone().map(|id| Predicate::Eq(Column::AssigneeId, id.into())))
			.filter_opt(criteria.project_id.clone().map(|id| Predicate::Eq(Column::ProjectId, id.into())))
			.filter_opt(text)
			.filter_opt(criteria.date_from.map(|from| Predicate::Gte(Column::UpdatedAt, from.into())))
			.filter_opt(criteria.date_to.map(|to| Predicate::Lte(Column::UpdatedAt, to.into())))
			.filter_opt((!criteria.include_archived).then(|| Predicate::Eq(Column::IsArchived, false.into())))
			.filter_opt(criteria.priority.map(|priority| Predicate::Eq(Column::Priority, priority.into())))
			.order_by(criteria.sort_by);

		Ok(plan)
	}
}

#[async_trait]
impl QueryService<TaskFilters, TaskRecord> for TaskQuery {
	async fn query(&self, criteria: &TaskFilters, range: PageRange, cancel: &CancellationToken) -> Result<PageResult<TaskRecord>> {
		let plan = Self::plan(criteria, range)?;
		crate::execute(self.backend.as_ref(), plan, cancel).await
	}
}
