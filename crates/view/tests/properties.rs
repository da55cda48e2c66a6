#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use docket_model::{SortKey, TaskFilters};
use docket_query::{MemoryBackend, TaskQuery};
use docket_store::{KeyValueStore, MemoryStore};
use docket_view::{FilterChange, QueryView, TaskSearchView, ViewOptions, hydrate};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
	Text(String),
	Archived(bool),
	Priority(Option<u8>),
	Sort(SortKey),
	Page(u32),
}

fn edit() -> impl Strategy<Value = Edit> {
	prop_oneof![
		"[a-c, ]{0,3}".prop_map(Edit::Text),
		any::<bool>().prop_map(Edit::Archived),
		proptest::option::of(0u8..4).prop_map(Edit::Priority),
		prop::sample::select(SortKey::ALL.to_vec()).prop_map(Edit::Sort),
		(0u32..5).prop_map(Edit::Page),
	]
}

fn view(store: &Arc<MemoryStore>) -> TaskSearchView {
	QueryView::new(
		Arc::new(TaskQuery::new(Arc::new(MemoryBackend::new()))),
		Arc::clone(store) as Arc<dyn KeyValueStore>,
		&ViewOptions::default(),
	)
}

proptest! {
	#[test]
	fn commits_reset_the_page_and_persist(edits in prop::collection::vec(edit(), 1..24)) {
		let store = Arc::new(MemoryStore::new());
		let mut view = view(&store);

		for edit in edits {
			let page_before = view.page();
			let before = view.filters().clone();
			let next = match edit {
				Edit::Page(page) => {
					view.set_page(page);
					continue;
				}
				Edit::Text(text) => TaskFilters { text, ..before.clone() },
				Edit::Archived(include_archived) => TaskFilters { include_archived, ..before.clone() },
				Edit::Priority(priority) => TaskFilters { priority, ..before.clone() },
				Edit::Sort(sort_by) => TaskFilters { sort_by, ..before.clone() },
			};

			let change = view.set_filters(next.clone());
			if next == before {
				prop_assert_eq!(change, FilterChange::Unchanged);
				prop_assert_eq!(view.page(), page_before);
			} else {
				prop_assert_eq!(change, FilterChange::Committed);
				prop_assert_eq!(view.page(), 0);
			}
			prop_assert_eq!(view.filters(), &next);
		}

		let key = ViewOptions::default().storage_key::<TaskFilters>();
		if store.contains(key.as_str()) {
			let persisted: Option<TaskFilters> = hydrate(store.as_ref(), &key);
			prop_assert_eq!(persisted.as_ref(), Some(view.filters()));
		} else {
			prop_assert_eq!(view.filters(), &TaskFilters::default());
		}
	}

	#[test]
	fn repeating_an_update_is_idempotent(text in "[a-z]{0,6}", priority in proptest::option::of(0u8..5)) {
		let store = Arc::new(MemoryStore::new());
		let mut view = view(&store);
		let next = TaskFilters { text, priority, ..TaskFilters::default() };

		view.set_filters(next.clone());
		view.set_page(3);
		prop_assert_eq!(view.set_filters(next), FilterChange::Unchanged);
		prop_assert_eq!(view.page(), 3);
	}
}
