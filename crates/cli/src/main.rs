//! docket binary.
//!
//! Drives the task search and master library views over a JSON fixture, with
//! filters persisted per identity in the configured storage directory.

mod app;
mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use docket_config::Config;
use docket_store::FileStore;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
	let options = config.view_options(cli.identity.as_deref());
	let storage_dir = config.storage_dir()?;
	info!(dir = %storage_dir.display(), namespace = %options.namespace, "using filter storage");

	let fixture = app::load_fixture(&cli.fixture)?;
	let mut shell = app::Shell::new(app::backend(fixture), Arc::new(FileStore::new(storage_dir)), &options);

	let result = shell.run(&cli.command).await;
	shell.dispose();
	print!("{}", result?);
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("DOCKET_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("docket=debug,docket_view=debug,docket_query=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
