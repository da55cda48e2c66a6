//! Membership checks against the current page, falling back to a lookup.

use std::future::Future;
use std::sync::Arc;

use docket_model::{Criteria, Record, TaskId};
use docket_query::{PageRange, QueryService};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Answer to "does this view's collection contain the row?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
	/// No id was given.
	Absent,
	/// The row is on the currently loaded page.
	Cached,
	/// A lookup found the row.
	Found,
	/// A lookup found no such row.
	NotFound,
	/// The lookup failed or was cancelled.
	LookupFailed,
}

impl Membership {
	/// Collapses the answer to a boolean; only [`Cached`](Self::Cached) and
	/// [`Found`](Self::Found) are members.
	pub fn is_member(self) -> bool {
		matches!(self, Self::Cached | Self::Found)
	}
}

enum Step<C, R> {
	Resolved(Membership),
	Lookup {
		service: Arc<dyn QueryService<C, R>>,
		id: TaskId,
		cancel: CancellationToken,
	},
}

/// Answers membership from the loaded page, issuing a single-row lookup on a
/// miss.
///
/// The page is the only cache: entries live exactly as long as the page they
/// were loaded with. Lookups run on child tokens of the owning view's lifetime.
pub struct MembershipCache<C, R> {
	service: Arc<dyn QueryService<C, R>>,
	lifetime: CancellationToken,
}

impl<C: Criteria, R: Record> MembershipCache<C, R> {
	/// Creates a cache whose lookups query `service` and stop when `lifetime`
	/// is cancelled.
	pub fn new(service: Arc<dyn QueryService<C, R>>, lifetime: CancellationToken) -> Self {
		Self { service, lifetime }
	}

	/// Checks whether `id` belongs to the collection.
	///
	/// The page scan happens before this returns, so a row on the current page
	/// never reaches the service. The returned future performs the lookup, if
	/// any, and does not borrow the cache.
	pub fn check(&self, items: &[R], id: Option<&TaskId>) -> impl Future<Output = Membership> + Send + use<C, R> {
		let step = match id {
			None => Step::Resolved(Membership::Absent),
			Some(id) if items.iter().any(|item| item.id() == id) => {
				debug!(%id, "membership answered from current page");
				Step::Resolved(Membership::Cached)
			}
			Some(id) => Step::Lookup {
				service: Arc::clone(&self.service),
				id: id.clone(),
				cancel: self.lifetime.child_token(),
			},
		};

		async move {
			match step {
				Step::Resolved(membership) => membership,
				Step::Lookup { service, id, cancel } => lookup(service.as_ref(), &id, &cancel).await,
			}
		}
	}
}

async fn lookup<C: Criteria, R: Record>(service: &dyn QueryService<C, R>, id: &TaskId, cancel: &CancellationToken) -> Membership {
	let criteria = C::scoped_to(id);
	let result = tokio::select! {
		biased;
		_ = cancel.cancelled() => return Membership::LookupFailed,
		result = service.query(&criteria, PageRange::single(), cancel) => result,
	};
	match result {
		Ok(page) if page.count > 0 => Membership::Found,
		Ok(_) => Membership::NotFound,
		Err(error) => {
			debug!(%id, %error, "membership lookup failed");
			Membership::LookupFailed
		}
	}
}

#[cfg(test)]
mod tests;
