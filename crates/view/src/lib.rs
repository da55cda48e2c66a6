//! Paginated, filterable, cancellable query views.
//!
//! A [`QueryView`] binds criteria of one view kind to a
//! [`QueryService`](docket_query::QueryService) and a
//! [`KeyValueStore`](docket_store::KeyValueStore):
//! * [`FilterStore`]: owns the criteria and mirrors committed changes to storage
//! * [`Pagination`]: page index and page size
//! * [`QueryController`]: issues fetches, cancels superseded ones and applies
//!   only the last issued result
//! * [`MembershipCache`]: answers "is this row in the collection?" from the
//!   loaded page before asking the service
//!
//! The view is single-owner: every mutator takes `&mut self`, and the owning
//! shell calls [`QueryView::reconcile`] after mutating.

#![warn(missing_docs)]

pub mod controller;
pub mod filter_store;
pub mod membership;
pub mod pagination;
#[cfg(test)]
mod testing;
pub mod view;

pub use controller::{Disposition, FetchRequest, FetchStatus, QueryController};
pub use filter_store::{FilterChange, FilterStore, hydrate};
pub use membership::{Membership, MembershipCache};
pub use pagination::Pagination;
pub use view::{DEFAULT_NAMESPACE, LibraryView, QueryView, TaskSearchView, ViewOptions};
