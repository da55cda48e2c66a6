use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use docket_model::{Criteria, LibraryFilters, Record, SortKey, TaskFilters, TaskId, TaskRecord, TaskStatus};
use docket_query::{Fixture, LibraryQuery, MemoryBackend, QueryBackend, TaskQuery};
use docket_store::KeyValueStore;
use docket_view::{LibraryView, Membership, QueryView, TaskSearchView, ViewOptions};
use tracing::debug;

use crate::cli::{Command, LibraryArgs, PageArgs, SearchArgs, ViewKind};

/// Both views over one backend and filter store.
pub struct Shell {
	search: TaskSearchView,
	library: LibraryView,
}

impl Shell {
	pub fn new(backend: Arc<dyn QueryBackend>, store: Arc<dyn KeyValueStore>, options: &ViewOptions) -> Self {
		Self {
			search: QueryView::new(Arc::new(TaskQuery::new(Arc::clone(&backend))), Arc::clone(&store), options),
			library: QueryView::new(Arc::new(LibraryQuery::new(backend)), store, options),
		}
	}

	/// Runs `command` and returns the text to print.
	pub async fn run(&mut self, command: &Command) -> anyhow::Result<String> {
		match command {
			Command::Search(args) => {
				apply_search(&mut self.search, args)?;
				load(&mut self.search).await
			}
			Command::Library(args) => {
				apply_library(&mut self.library, args);
				load(&mut self.library).await
			}
			Command::Check { id } => {
				load(&mut self.library).await?;
				let id = TaskId::new(id.as_str());
				let membership = self.library.check_membership(Some(&id)).await;
				Ok(format!("{id}: {}\n", describe(membership)))
			}
			Command::Reset { view } => {
				match view {
					ViewKind::Search => self.search.reset_filters(),
					ViewKind::Library => self.library.reset_filters(),
				}
				Ok(format!("reset {} filters\n", view_name(*view)))
			}
		}
	}

	pub fn dispose(&mut self) {
		self.search.dispose();
		self.library.dispose();
	}
}

pub fn load_fixture(path: &Path) -> anyhow::Result<Fixture> {
	let raw = std::fs::read_to_string(path).with_context(|| format!("reading fixture {}", path.display()))?;
	serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
}

pub fn backend(fixture: Fixture) -> Arc<dyn QueryBackend> {
	Arc::new(MemoryBackend::from_fixture(fixture))
}

fn apply_search(view: &mut TaskSearchView, args: &SearchArgs) -> anyhow::Result<()> {
	let status = match args.status.as_deref() {
		Some(name) => match TaskStatus::parse(name) {
			Some(status) => Some(status),
			None => bail!("unknown status `{name}`"),
		},
		None => None,
	};

	view.update_filters(|prev| TaskFilters {
		text: args.text.clone().unwrap_or_else(|| prev.text.clone()),
		status: if args.any_status { None } else { status.or(prev.status) },
		priority: if args.any_priority { None } else { args.priority.or(prev.priority) },
		include_archived: !args.no_archived && (args.archived || prev.include_archived),
		sort_by: args.sort.as_deref().map_or(prev.sort_by, SortKey::parse),
		..prev.clone()
	});
	apply_pages(view, &args.pages);
	Ok(())
}

fn apply_library(view: &mut LibraryView, args: &LibraryArgs) {
	view.update_filters(|prev| LibraryFilters {
		text: args.text.clone().unwrap_or_else(|| prev.text.clone()),
		sort_by: args.sort.as_deref().map_or(prev.sort_by, SortKey::parse),
		..prev.clone()
	});
	apply_pages(view, &args.pages);
}

fn apply_pages<C: Criteria, R: Record>(view: &mut QueryView<C, R>, pages: &PageArgs) {
	if let Some(limit) = pages.limit {
		view.set_limit(limit);
	}
	if let Some(page) = pages.page {
		view.set_page(page);
	}
}

async fn load<C: Criteria>(view: &mut QueryView<C, TaskRecord>) -> anyhow::Result<String> {
	if let Some(generation) = view.reconcile() {
		debug!(generation, "waiting for page");
	}
	view.settle().await;
	if let Some(error) = view.error() {
		bail!("query failed: {error}");
	}
	Ok(render(view.items(), view.page(), view.page_count(), view.count()))
}

/// Formats a page as one row per task followed by a `page x/y (count)` footer.
pub fn render(items: &[TaskRecord], page: u32, page_count: u64, count: u64) -> String {
	let mut out = String::new();
	for task in items {
		let _ = writeln!(out, "{}  {}  {}  {}", task.id, task.title, task.status, task.priority);
	}
	let _ = writeln!(out, "page {}/{} ({count})", u64::from(page) + 1, page_count);
	out
}

fn describe(membership: Membership) -> &'static str {
	match membership {
		Membership::Absent => "no id given",
		Membership::Cached => "in library (current page)",
		Membership::Found => "in library",
		Membership::NotFound => "not in library",
		Membership::LookupFailed => "lookup failed",
	}
}

fn view_name(view: ViewKind) -> &'static str {
	match view {
		ViewKind::Search => TaskFilters::VIEW,
		ViewKind::Library => LibraryFilters::VIEW,
	}
}
