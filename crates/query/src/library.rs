//! Master library binding.

use std::sync::Arc;

use async_trait::async_trait;
use docket_model::{LibraryFilters, TaskRecord};
use tokio_util::sync::CancellationToken;

use crate::plan::contains_pattern;
use crate::{Collection, Column, PageRange, PageResult, Predicate, QueryBackend, QueryPlan, QueryService, Result};

/// [`QueryService`] for the master library view over `master_library_tasks`.
///
/// Text is matched against the title alone and passed through as a single
/// parameter, so punctuation such as commas reaches the backend untouched.
#[derive(Clone)]
pub struct LibraryQuery {
	backend: Arc<dyn QueryBackend>,
}

impl LibraryQuery {
	/// Creates a binding executing on `backend`.
	pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
		Self { backend }
	}

	/// Translates `criteria` into a plan for `range`.
	pub fn plan(criteria: &LibraryFilters, range: PageRange) -> QueryPlan {
		QueryPlan::new(Collection::MasterLibraryTasks, range)
			.filter_opt(criteria.task_id.as_ref().map(|id| Predicate::Eq(Column::Id, id.as_str().into())))
			.filter_opt((!criteria.text.is_empty()).then(|| Predicate::ILike(Column::Title, contains_pattern(&criteria.text))))
			.order_by(criteria.sort_by)
	}
}

#[async_trait]
impl QueryService<LibraryFilters, TaskRecord> for LibraryQuery {
	async fn query(&self, criteria: &LibraryFilters, range: PageRange, cancel: &CancellationToken) -> Result<PageResult<TaskRecord>> {
		crate::execute(self.backend.as_ref(), Self::plan(criteria, range), cancel).await
	}
}
