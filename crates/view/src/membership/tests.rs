use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docket_model::{LibraryFilters, TaskRecord};
use docket_query::{PageResult, QueryError};
use parking_lot::Mutex;

use super::*;
use crate::testing::record;

/// Library service answering from a fixed id list, or failing every call.
#[derive(Default)]
struct Lookup {
	known: Vec<&'static str>,
	fail: bool,
	calls: AtomicUsize,
	seen: Mutex<Vec<(LibraryFilters, PageRange)>>,
}

#[async_trait]
impl QueryService<LibraryFilters, TaskRecord> for Lookup {
	async fn query(&self, criteria: &LibraryFilters, range: PageRange, _cancel: &CancellationToken) -> docket_query::Result<PageResult<TaskRecord>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.seen.lock().push((criteria.clone(), range));
		if self.fail {
			return Err(QueryError::Transport("offline".into()));
		}
		let hit = criteria.task_id.as_ref().is_some_and(|id| self.known.contains(&id.as_str()));
		let items = if hit { vec![record(criteria.task_id.as_ref().unwrap().as_str())] } else { Vec::new() };
		Ok(PageResult {
			count: items.len() as u64,
			items,
			from: range.from,
			limit: range.limit(),
		})
	}
}

fn cache(service: &Arc<Lookup>) -> MembershipCache<LibraryFilters, TaskRecord> {
	MembershipCache::new(Arc::clone(service) as Arc<dyn QueryService<LibraryFilters, TaskRecord>>, CancellationToken::new())
}

#[tokio::test(flavor = "current_thread")]
async fn absent_id_is_not_a_member() {
	let service = Arc::new(Lookup::default());
	assert_eq!(cache(&service).check(&[], None).await, Membership::Absent);
	assert_eq!(service.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn current_page_hit_skips_the_service() {
	let service = Arc::new(Lookup::default());
	let items = vec![record("a"), record("b")];
	let membership = cache(&service).check(&items, Some(&TaskId::new("b"))).await;
	assert_eq!(membership, Membership::Cached);
	assert!(membership.is_member());
	assert_eq!(service.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn miss_issues_one_scoped_single_row_lookup() {
	let service = Arc::new(Lookup {
		known: vec!["xyz"],
		..Lookup::default()
	});
	let membership = cache(&service).check(&[record("a")], Some(&TaskId::new("xyz"))).await;
	assert_eq!(membership, Membership::Found);
	assert_eq!(service.calls.load(Ordering::SeqCst), 1);

	let seen = service.seen.lock();
	assert_eq!(seen[0].0.task_id, Some(TaskId::new("xyz")));
	assert_eq!(seen[0].1, PageRange { from: 0, to: 0 });
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_id_is_not_found() {
	let service = Arc::new(Lookup::default());
	let membership = cache(&service).check(&[], Some(&TaskId::new("nope"))).await;
	assert_eq!(membership, Membership::NotFound);
	assert!(!membership.is_member());
}

#[tokio::test(flavor = "current_thread")]
async fn lookup_failures_collapse_to_false() {
	let service = Arc::new(Lookup {
		fail: true,
		..Lookup::default()
	});
	let membership = cache(&service).check(&[], Some(&TaskId::new("x"))).await;
	assert_eq!(membership, Membership::LookupFailed);
	assert!(!membership.is_member());
}

#[tokio::test(flavor = "current_thread")]
async fn cancelled_lifetime_fails_lookups() {
	let service = Arc::new(Lookup::default());
	let lifetime = CancellationToken::new();
	let cache = MembershipCache::new(Arc::clone(&service) as Arc<dyn QueryService<LibraryFilters, TaskRecord>>, lifetime.clone());
	let pending = cache.check(&[], Some(&TaskId::new("x")));
	lifetime.cancel();

	assert_eq!(pending.await, Membership::LookupFailed);
	assert_eq!(service.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn concurrent_checks_are_independent() {
	let service = Arc::new(Lookup {
		known: vec!["a"],
		..Lookup::default()
	});
	let cache = cache(&service);
	let (first, second) = tokio::join!(cache.check(&[], Some(&TaskId::new("a"))), cache.check(&[], Some(&TaskId::new("b"))));
	assert_eq!(first, Membership::Found);
	assert_eq!(second, Membership::NotFound);
	assert_eq!(service.calls.load(Ordering::SeqCst), 2);
}
