//! Query service fakes shared by the unit and integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use docket_model::{Criteria, TaskId, TaskRecord, TaskStatus};
use docket_query::{PageRange, PageResult, QueryError, QueryService};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

pub type Reply = docket_query::Result<PageResult<TaskRecord>>;

/// One recorded service call.
#[derive(Debug, Clone)]
pub struct Call<C> {
	pub criteria: C,
	pub range: PageRange,
	pub cancel: CancellationToken,
}

/// A query service whose calls stay pending until the test resolves them.
pub struct Gated<C> {
	calls: Mutex<Vec<Call<C>>>,
	replies: Mutex<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl<C> Default for Gated<C> {
	fn default() -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			replies: Mutex::new(Vec::new()),
		}
	}
}

impl<C: Criteria> Gated<C> {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn calls(&self) -> Vec<Call<C>> {
		self.calls.lock().clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().len()
	}

	pub fn cancelled(&self, call: usize) -> bool {
		self.calls.lock()[call].cancel.is_cancelled()
	}

	pub fn resolve(&self, call: usize, reply: Reply) {
		if let Some(tx) = self.replies.lock()[call].take() {
			let _ = tx.send(reply);
		}
	}

	/// Yields until at least `calls` calls reached the service.
	pub async fn wait_for_calls(&self, calls: usize) {
		for _ in 0..100 {
			if self.call_count() >= calls {
				return;
			}
			tokio::task::yield_now().await;
		}
		panic!("expected {calls} service calls, saw {}", self.call_count());
	}
}

#[async_trait]
impl<C: Criteria> QueryService<C, TaskRecord> for Gated<C> {
	async fn query(&self, criteria: &C, range: PageRange, cancel: &CancellationToken) -> Reply {
		let (tx, rx) = oneshot::channel();
		self.calls.lock().push(Call {
			criteria: criteria.clone(),
			range,
			cancel: cancel.clone(),
		});
		self.replies.lock().push(Some(tx));
		tokio::select! {
			_ = cancel.cancelled() => Err(QueryError::Aborted),
			reply = rx => reply.unwrap_or(Err(QueryError::Aborted)),
		}
	}
}

/// A query service that panics on every call.
#[derive(Debug, Default)]
pub struct Panicking;

#[async_trait]
impl<C: Criteria> QueryService<C, TaskRecord> for Panicking {
	async fn query(&self, _criteria: &C, _range: PageRange, _cancel: &CancellationToken) -> Reply {
		panic!("backend bug");
	}
}

pub fn record(id: &str) -> TaskRecord {
	TaskRecord {
		id: TaskId::new(id),
		title: format!("Task {id}"),
		description: None,
		status: TaskStatus::Open,
		task_type: None,
		assignee_id: None,
		project_id: None,
		priority: 2,
		is_archived: false,
		updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
	}
}

pub fn page(ids: &[&str], count: u64) -> Reply {
	Ok(PageResult {
		items: ids.iter().map(|id| record(id)).collect(),
		count,
		from: 0,
		limit: 20,
	})
}
