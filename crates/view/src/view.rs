//! The aggregated view handle.

use std::future::Future;
use std::sync::Arc;

use docket_model::{Criteria, LibraryFilters, Record, TaskFilters, TaskId, TaskRecord};
use docket_query::{PageRange, QueryError, QueryService};
use docket_store::{KeyValueStore, StorageKey};
use tracing::debug;

use crate::{FetchRequest, FetchStatus, FilterChange, FilterStore, Membership, MembershipCache, Pagination, QueryController};

/// Storage namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "sdg.filters";

/// Construction parameters of a [`QueryView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
	/// Rows per page.
	pub limit: u32,
	/// Caller identity scoping the persisted filters; anonymous when unset.
	pub identity: Option<String>,
	/// Storage namespace for persisted filters.
	pub namespace: String,
}

impl Default for ViewOptions {
	fn default() -> Self {
		Self {
			limit: Pagination::DEFAULT_LIMIT,
			identity: None,
			namespace: DEFAULT_NAMESPACE.to_string(),
		}
	}
}

impl ViewOptions {
	/// Storage key for views with criteria `C`.
	pub fn storage_key<C: Criteria>(&self) -> StorageKey {
		StorageKey::new(&self.namespace, C::VIEW, self.identity.as_deref())
	}
}

/// The generic task search view.
pub type TaskSearchView = QueryView<TaskFilters, TaskRecord>;

/// The master library view.
pub type LibraryView = QueryView<LibraryFilters, TaskRecord>;

/// A paginated, filterable, cancellable view over a [`QueryService`].
///
/// Mutators only change local state. The owning shell calls
/// [`reconcile`](Self::reconcile) after them to issue a fetch when the
/// `(filters, page, limit)` tuple changed, then drives outcomes in with
/// [`poll_outcomes`](Self::poll_outcomes) or [`settle`](Self::settle).
pub struct QueryView<C, R> {
	filters: FilterStore<C>,
	pagination: Pagination,
	controller: QueryController<C, R>,
	membership: MembershipCache<C, R>,
}

impl<C: Criteria, R: Record> QueryView<C, R> {
	/// Creates a view, hydrating its filters from `store`. Nothing is fetched
	/// until the first [`reconcile`](Self::reconcile).
	pub fn new(service: Arc<dyn QueryService<C, R>>, store: Arc<dyn KeyValueStore>, options: &ViewOptions) -> Self {
		let key = options.storage_key::<C>();
		let filters = FilterStore::open(store, key);
		let controller = QueryController::new(Arc::clone(&service));
		let membership = MembershipCache::new(service, controller.lifetime().clone());
		Self {
			filters,
			pagination: Pagination::new(options.limit),
			controller,
			membership,
		}
	}

	/// Current criteria.
	pub fn filters(&self) -> &C {
		self.filters.filters()
	}

	/// Replaces the criteria. A value equal to the current one is a no-op;
	/// anything else is persisted and returns to the first page.
	pub fn set_filters(&mut self, next: C) -> FilterChange {
		let change = self.filters.commit(next);
		if change.is_committed() {
			debug!(key = %self.filters.key(), "filters changed");
			self.pagination.reset();
		}
		change
	}

	/// Replaces the criteria with a value computed from the current ones.
	pub fn update_filters(&mut self, next: impl FnOnce(&C) -> C) -> FilterChange {
		let next = next(self.filters.filters());
		self.set_filters(next)
	}

	/// Restores the baseline criteria, returns to the first page and deletes
	/// the persisted record.
	pub fn reset_filters(&mut self) {
		self.filters.reset();
		self.pagination.reset();
	}

	/// Persists the current criteria.
	pub fn save_current_filters(&self) {
		self.filters.save();
	}

	/// Current page index.
	pub fn page(&self) -> u32 {
		self.pagination.page()
	}

	/// Moves to `page`.
	pub fn set_page(&mut self, page: u32) {
		self.pagination.set_page(page);
	}

	/// Moves to a page computed from the current one, clamped at zero.
	pub fn update_page(&mut self, next: impl FnOnce(u32) -> i64) {
		self.pagination.update_page(next);
	}

	/// Rows per page.
	pub fn limit(&self) -> u32 {
		self.pagination.limit()
	}

	/// Changes the page size.
	pub fn set_limit(&mut self, limit: u32) {
		self.pagination.set_limit(limit);
	}

	/// Row range of the current page.
	pub fn range(&self) -> PageRange {
		self.pagination.range()
	}

	/// Rows of the last applied page.
	pub fn items(&self) -> &[R] {
		self.controller.items()
	}

	/// Total matches reported with the last applied page.
	pub fn count(&self) -> u64 {
		self.controller.count()
	}

	/// Whether a fetch is in flight.
	pub fn is_loading(&self) -> bool {
		self.controller.is_loading()
	}

	/// Failure of the last applied fetch.
	pub fn error(&self) -> Option<&QueryError> {
		self.controller.error()
	}

	/// Current lifecycle state.
	pub fn status(&self) -> FetchStatus {
		self.controller.status()
	}

	/// Number of pages for the current count.
	pub fn page_count(&self) -> u64 {
		self.pagination.page_count(self.count())
	}

	/// Whether a previous page exists.
	pub fn has_previous(&self) -> bool {
		self.pagination.has_previous()
	}

	/// Whether rows exist past the current page.
	pub fn has_next(&self) -> bool {
		self.pagination.has_next(self.count())
	}

	/// Issues a fetch if `(filters, page, limit)` differs from the last issued
	/// tuple. Returns the new generation when a fetch was issued.
	pub fn reconcile(&mut self) -> Option<u64> {
		let request = FetchRequest {
			filters: self.filters.filters().clone(),
			page: self.pagination.page(),
			limit: self.pagination.limit(),
		};
		self.controller.issue(request)
	}

	/// Applies outcomes that have already arrived without waiting.
	pub fn poll_outcomes(&mut self) -> usize {
		self.controller.poll()
	}

	/// Waits for the current fetch to resolve and applies it.
	pub async fn settle(&mut self) {
		self.controller.settle().await;
	}

	/// Checks whether `id` belongs to this view's collection. Rows on the
	/// current page answer immediately; others cost one single-row lookup.
	pub fn check_membership(&self, id: Option<&TaskId>) -> impl Future<Output = Membership> + Send + use<C, R> {
		self.membership.check(self.controller.items(), id)
	}

	/// Cancels the in-flight fetch and pending lookups. The view stops
	/// issuing and applying fetches afterwards.
	pub fn dispose(&mut self) {
		self.controller.dispose();
	}

	/// Whether [`dispose`](Self::dispose) has been called.
	pub fn is_disposed(&self) -> bool {
		self.controller.is_disposed()
	}
}
