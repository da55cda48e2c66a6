//! Fetch lifecycle: issue, cancel and apply page queries.
//!
//! Every issued request gets a fresh generation and a cancellation token that
//! is a child of the controller's lifetime token. Issuing again cancels the
//! previous token, and an outcome is applied only when its generation is still
//! the current one, so results land in issuance order regardless of the order
//! the service resolves them in.

use std::sync::Arc;

use docket_model::{Criteria, Record};
use docket_query::{PageRange, PageResult, QueryError, QueryService};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// The dependency tuple a fetch is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<C> {
	/// Criteria sent to the service.
	pub filters: C,
	/// Zero-based page index.
	pub page: u32,
	/// Rows per page.
	pub limit: u32,
}

impl<C> FetchRequest<C> {
	/// Row range covered by this request.
	pub fn range(&self) -> PageRange {
		PageRange::for_page(self.page, self.limit)
	}
}

/// Coarse lifecycle state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
	/// Nothing has been fetched yet.
	Idle,
	/// A request is in flight.
	Loading,
	/// The last applied request succeeded.
	Success,
	/// The last applied request failed.
	Failed,
}

/// How a resolved fetch was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
	/// The page replaced `items` and `count`.
	Applied,
	/// The failure was recorded in `error`.
	Failed,
	/// The current request was aborted; nothing was surfaced.
	Cancelled,
	/// A newer request had been issued; the outcome was dropped.
	Stale,
	/// The controller was disposed; the outcome was dropped.
	Disposed,
}

/// Result of one spawned fetch, tagged with its generation.
#[derive(Debug)]
pub(crate) struct FetchOutcome<R> {
	generation: u64,
	result: docket_query::Result<PageResult<R>>,
}

struct InFlight {
	generation: u64,
	cancel: CancellationToken,
}

/// Delivers exactly one outcome for a spawned fetch.
///
/// Dropped while still armed, as when the service panics, it reports a
/// transport failure so the controller never waits on a dead task.
struct OutcomeSender<R> {
	generation: u64,
	tx: Option<mpsc::UnboundedSender<FetchOutcome<R>>>,
}

impl<R> OutcomeSender<R> {
	fn send(mut self, result: docket_query::Result<PageResult<R>>) {
		if let Some(tx) = self.tx.take() {
			let _ = tx.send(FetchOutcome {
				generation: self.generation,
				result,
			});
		}
	}

	/// Drops the sender without reporting anything.
	fn disarm(mut self) {
		self.tx = None;
	}
}

impl<R> Drop for OutcomeSender<R> {
	fn drop(&mut self) {
		if let Some(tx) = self.tx.take() {
			warn!(generation = self.generation, "fetch task ended without a result");
			let _ = tx.send(FetchOutcome {
				generation: self.generation,
				result: Err(QueryError::Transport("query task panicked".into())),
			});
		}
	}
}

/// Issues page queries for a view and owns the fetched state.
pub struct QueryController<C, R> {
	service: Arc<dyn QueryService<C, R>>,
	generation: u64,
	in_flight: Option<InFlight>,
	issued: Option<FetchRequest<C>>,
	lifetime: CancellationToken,
	outcomes_tx: mpsc::UnboundedSender<FetchOutcome<R>>,
	outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome<R>>,
	items: Vec<R>,
	count: u64,
	is_loading: bool,
	error: Option<QueryError>,
	loaded: bool,
	disposed: bool,
}

impl<C: Criteria, R: Record> QueryController<C, R> {
	/// Creates an idle controller querying `service`.
	pub fn new(service: Arc<dyn QueryService<C, R>>) -> Self {
		let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
		Self {
			service,
			generation: 0,
			in_flight: None,
			issued: None,
			lifetime: CancellationToken::new(),
			outcomes_tx,
			outcomes_rx,
			items: Vec::new(),
			count: 0,
			is_loading: false,
			error: None,
			loaded: false,
			disposed: false,
		}
	}

	/// Generation of the most recently issued request; zero before the first.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Token cancelled when the controller is disposed or dropped.
	pub fn lifetime(&self) -> &CancellationToken {
		&self.lifetime
	}

	/// The request most recently issued.
	pub fn issued(&self) -> Option<&FetchRequest<C>> {
		self.issued.as_ref()
	}

	/// Rows of the last applied page.
	pub fn items(&self) -> &[R] {
		&self.items
	}

	/// Total matches reported with the last applied page.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Whether the current request is still in flight.
	pub fn is_loading(&self) -> bool {
		self.is_loading
	}

	/// Failure of the last applied request.
	pub fn error(&self) -> Option<&QueryError> {
		self.error.as_ref()
	}

	/// Whether [`dispose`](Self::dispose) has been called.
	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Current lifecycle state.
	pub fn status(&self) -> FetchStatus {
		if self.is_loading {
			FetchStatus::Loading
		} else if self.error.is_some() {
			FetchStatus::Failed
		} else if self.loaded {
			FetchStatus::Success
		} else {
			FetchStatus::Idle
		}
	}

	/// Issues `request` unless it equals the last issued one.
	///
	/// Cancels the previous in-flight request, marks the controller loading and
	/// spawns the service call. Returns the new generation, or `None` when the
	/// request was deduplicated or the controller is disposed.
	pub fn issue(&mut self, request: FetchRequest<C>) -> Option<u64> {
		if self.disposed || self.issued.as_ref() == Some(&request) {
			return None;
		}

		self.generation = self.generation.wrapping_add(1);
		let generation = self.generation;
		if let Some(in_flight) = self.in_flight.take() {
			debug!(superseded = in_flight.generation, "cancelling fetch");
			in_flight.cancel.cancel();
		}

		let cancel = self.lifetime.child_token();
		self.in_flight = Some(InFlight {
			generation,
			cancel: cancel.clone(),
		});
		self.is_loading = true;
		self.error = None;

		let range = request.range();
		debug!(generation, page = request.page, from = range.from, to = range.to, "issuing fetch");

		let service = Arc::clone(&self.service);
		let sender = OutcomeSender {
			generation,
			tx: Some(self.outcomes_tx.clone()),
		};
		let filters = request.filters.clone();
		self.issued = Some(request);

		tokio::spawn(async move {
			let result = tokio::select! {
				biased;
				_ = cancel.cancelled() => return sender.disarm(),
				result = service.query(&filters, range, &cancel) => result,
			};
			if cancel.is_cancelled() {
				return sender.disarm();
			}
			sender.send(result);
		});

		Some(generation)
	}

	/// Applies every outcome that has already arrived. Returns how many were
	/// applied rather than dropped.
	pub fn poll(&mut self) -> usize {
		let mut applied = 0;
		while let Ok(outcome) = self.outcomes_rx.try_recv() {
			if !matches!(self.apply(outcome), Disposition::Stale | Disposition::Disposed) {
				applied += 1;
			}
		}
		applied
	}

	/// Waits until the current request has resolved and been applied.
	///
	/// Returns immediately when nothing is loading or the controller is disposed.
	pub async fn settle(&mut self) {
		while self.is_loading && !self.disposed {
			match self.outcomes_rx.recv().await {
				Some(outcome) => {
					self.apply(outcome);
				}
				None => break,
			}
		}
	}

	pub(crate) fn apply(&mut self, outcome: FetchOutcome<R>) -> Disposition {
		if self.disposed {
			return Disposition::Disposed;
		}
		if outcome.generation != self.generation {
			debug!(stale = outcome.generation, current = self.generation, "discarding stale fetch outcome");
			return Disposition::Stale;
		}

		self.in_flight = None;
		self.is_loading = false;
		match outcome.result {
			Ok(page) => {
				debug!(generation = outcome.generation, rows = page.items.len(), count = page.count, "applied page");
				self.items = page.items;
				self.count = page.count;
				self.loaded = true;
				Disposition::Applied
			}
			Err(QueryError::Aborted) => Disposition::Cancelled,
			Err(error) => {
				warn!(generation = outcome.generation, %error, "fetch failed");
				self.error = Some(error);
				Disposition::Failed
			}
		}
	}

	/// Cancels the in-flight request and every pending membership lookup.
	/// Outcomes arriving afterwards are dropped.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;
		self.lifetime.cancel();
		if let Some(in_flight) = self.in_flight.take() {
			in_flight.cancel.cancel();
		}
		debug!(generation = self.generation, "disposed query controller");
	}
}

impl<C, R> Drop for QueryController<C, R> {
	fn drop(&mut self) {
		self.lifetime.cancel();
	}
}
