use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "docket")]
#[command(about = "Browse task search and master library views from the terminal")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the user config directory)
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,

	/// Identity scoping persisted filters (overrides the config file)
	#[arg(long, value_name = "ID")]
	pub identity: Option<String>,

	/// JSON fixture with `tasks` and `master_library_tasks` arrays
	#[arg(long, value_name = "PATH")]
	pub fixture: PathBuf,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Search tasks
	Search(SearchArgs),
	/// Browse the master library
	Library(LibraryArgs),
	/// Check whether a task is in the master library
	Check {
		/// Task id to look up.
		id: String,
	},
	/// Forget the persisted filters of a view
	Reset {
		/// View whose filters are reset.
		view: ViewKind,
	},
}

/// Views with persisted filters.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
	/// Task search.
	Search,
	/// Master library.
	Library,
}

/// Page selection shared by listing commands.
#[derive(Args, Debug, Default, Clone)]
pub struct PageArgs {
	/// Zero-based page to show
	#[arg(long)]
	pub page: Option<u32>,

	/// Rows per page (overrides the config file)
	#[arg(long)]
	pub limit: Option<u32>,
}

/// Task search filters. Omitted flags keep the persisted values.
#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
	/// Text matched against title or description
	#[arg(long)]
	pub text: Option<String>,

	/// Workflow state (open, in_progress, blocked, done)
	#[arg(long)]
	pub status: Option<String>,

	/// Clear the persisted workflow state
	#[arg(long, conflicts_with = "status")]
	pub any_status: bool,

	/// Exact priority
	#[arg(long)]
	pub priority: Option<u8>,

	/// Clear the persisted priority
	#[arg(long, conflicts_with = "priority")]
	pub any_priority: bool,

	/// Include archived tasks
	#[arg(long)]
	pub archived: bool,

	/// Hide archived tasks again
	#[arg(long, conflicts_with = "archived")]
	pub no_archived: bool,

	/// Sort key (updated_desc, title_asc, priority_desc)
	#[arg(long)]
	pub sort: Option<String>,

	#[command(flatten)]
	pub pages: PageArgs,
}

/// Master library filters. Omitted flags keep the persisted values.
#[derive(Args, Debug, Default, Clone)]
pub struct LibraryArgs {
	/// Text matched against the title
	#[arg(long)]
	pub text: Option<String>,

	/// Sort key (updated_desc, title_asc, priority_desc)
	#[arg(long)]
	pub sort: Option<String>,

	#[command(flatten)]
	pub pages: PageArgs,
}
