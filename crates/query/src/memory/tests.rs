use std::sync::Arc;

use chrono::{TimeZone, Utc};
use docket_model::{LibraryFilters, SortKey, TaskFilters, TaskId, TaskStatus};
use pretty_assertions::assert_eq;

use super::*;
use crate::{LibraryQuery, PageRange, QueryService, TaskQuery};

fn row(id: &str, title: &str, day: u32) -> TaskRecord {
	TaskRecord {
		id: TaskId::new(id),
		title: title.to_string(),
		description: None,
		status: TaskStatus::Open,
		task_type: None,
		assignee_id: None,
		project_id: None,
		priority: 0,
		is_archived: false,
		updated_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
	}
}

fn ids(rows: &[TaskRecord]) -> Vec<&str> {
	rows.iter().map(|row| row.id.as_str()).collect()
}

#[test]
fn like_patterns() {
	assert!(like_match("Replace Bolts, Clips", "%bolts, clips%"));
	assert!(like_match("abc", "a_c"));
	assert!(like_match("abc", "%"));
	assert!(like_match("", "%"));
	assert!(!like_match("abc", "%d%"));
	assert!(!like_match("abcd", "a_c"));
	assert!(like_match("aXbXc", "%b%c"));
}

#[test]
fn pages_are_sliced_after_ordering() {
	let backend = MemoryBackend::new();
	for day in 1..=25 {
		backend.insert(Collection::Tasks, row(&format!("t{day:02}"), "Task", day));
	}

	let page = backend.run(&QueryPlan::new(Collection::Tasks, PageRange::for_page(1, 10)));
	assert_eq!(page.count, 25);
	assert_eq!(page.rows.len(), 10);
	assert_eq!(page.rows[0].id.as_str(), "t15");
	assert_eq!(page.rows[9].id.as_str(), "t06");

	let last = backend.run(&QueryPlan::new(Collection::Tasks, PageRange::for_page(2, 10)));
	assert_eq!(ids(&last.rows), vec!["t05", "t04", "t03", "t02", "t01"]);

	let beyond = backend.run(&QueryPlan::new(Collection::Tasks, PageRange::for_page(9, 10)));
	assert!(beyond.rows.is_empty());
	assert_eq!(beyond.count, 25);
}

#[test]
fn ties_break_by_id() {
	let backend = MemoryBackend::new();
	backend.insert(Collection::Tasks, row("b", "Same", 1));
	backend.insert(Collection::Tasks, row("a", "Same", 1));
	backend.insert(Collection::Tasks, row("c", "Same", 1));

	let plan = QueryPlan::new(Collection::Tasks, PageRange::new(0, 10)).order_by(SortKey::TitleAsc);
	assert_eq!(ids(&backend.run(&plan).rows), vec!["a", "b", "c"]);
}

#[test]
fn missing_collection_is_empty() {
	let backend = MemoryBackend::new();
	let page = backend.run(&QueryPlan::new(Collection::MasterLibraryTasks, PageRange::single()));
	assert_eq!(page, RawPage::default());
	assert_eq!(backend.len(Collection::MasterLibraryTasks), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn task_search_filters_through_the_backend() {
	let mut archived = row("t3", "Old pump", 3);
	archived.is_archived = true;
	let mut described = row("t2", "Check", 2);
	described.description = Some("Inspect the PUMP housing".into());
	let fixture = Fixture {
		tasks: vec![row("t1", "Pump seal", 1), described, archived, row("t4", "Paint", 4)],
		master_library_tasks: Vec::new(),
	};
	let service = TaskQuery::new(Arc::new(MemoryBackend::from_fixture(fixture)));
	let cancel = CancellationToken::new();

	let criteria = TaskFilters {
		text: "pump".into(),
		..TaskFilters::default()
	};
	let page = service.query(&criteria, PageRange::new(0, 20), &cancel).await.unwrap();
	assert_eq!(ids(&page.items), vec!["t2", "t1"]);
	assert_eq!(page.count, 2);

	let criteria = TaskFilters {
		include_archived: true,
		..criteria
	};
	let page = service.query(&criteria, PageRange::new(0, 20), &cancel).await.unwrap();
	assert_eq!(ids(&page.items), vec!["t3", "t2", "t1"]);
}

#[tokio::test(flavor = "current_thread")]
async fn library_title_search_keeps_commas() {
	let fixture = Fixture {
		tasks: Vec::new(),
		master_library_tasks: vec![row("m1", "Replace bolts, clips", 1), row("m2", "Replace bolts", 2)],
	};
	let service = LibraryQuery::new(Arc::new(MemoryBackend::from_fixture(fixture)));

	let criteria = LibraryFilters {
		text: "Bolts, Clips".into(),
		..LibraryFilters::default()
	};
	let page = service.query(&criteria, PageRange::new(0, 20), &CancellationToken::new()).await.unwrap();
	assert_eq!(ids(&page.items), vec!["m1"]);
	assert_eq!(page.count, 1);
	assert_eq!(page.from, 0);
	assert_eq!(page.limit, 20);
}

#[tokio::test(flavor = "current_thread")]
async fn cancelled_calls_abort() {
	let service = LibraryQuery::new(Arc::new(MemoryBackend::new()));
	let cancel = CancellationToken::new();
	cancel.cancel();

	let result = service.query(&LibraryFilters::default(), PageRange::single(), &cancel).await;
	assert_eq!(result, Err(QueryError::Aborted));
}

#[test]
fn fixture_tables_default_to_empty() {
	let fixture: Fixture = serde_json::from_str(r#"{"tasks":[]}"#).unwrap();
	assert!(fixture.master_library_tasks.is_empty());
}
