//! Plan execution seam.

use async_trait::async_trait;
use docket_model::TaskRecord;
use tokio_util::sync::CancellationToken;

use crate::{PageResult, QueryError, QueryPlan, Result};

/// Rows returned for a plan, plus the total match count ignoring the range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
	/// Rows within the plan's range.
	pub rows: Vec<TaskRecord>,
	/// Total matches.
	pub count: u64,
}

/// Executes query plans against a concrete store.
#[async_trait]
pub trait QueryBackend: Send + Sync {
	/// Runs `plan`. Implementations may observe `cancel` to stop early.
	async fn execute(&self, plan: QueryPlan, cancel: &CancellationToken) -> Result<RawPage>;
}

/// Runs `plan` on `backend`, resolving with [`QueryError::Aborted`] as soon as
/// `cancel` fires, and shapes the rows into a [`PageResult`].
pub async fn execute(backend: &dyn QueryBackend, plan: QueryPlan, cancel: &CancellationToken) -> Result<PageResult<TaskRecord>> {
	let range = plan.range;
	tracing::debug!(
		collection = %plan.collection,
		predicates = plan.predicates.len(),
		from = range.from,
		to = range.to,
		"executing query plan"
	);

	let page = tokio::select! {
		biased;
		_ = cancel.cancelled() => return Err(QueryError::Aborted),
		page = backend.execute(plan, cancel) => page?,
	};

	let mut rows = page.rows;
	let limit = usize::try_from(range.limit()).unwrap_or(usize::MAX);
	rows.truncate(limit);

	Ok(PageResult {
		items: rows,
		count: page.count,
		from: range.from,
		limit: range.limit(),
	})
}
