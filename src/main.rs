use clap::Parser;
use sortwatch::{
	filter, queue, watcher, CategoryTable, FileMover, RetryPolicy, SorterConfig, SorterWorker,
	WatchConfig, DEFAULT_QUEUE_CAPACITY,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "sortwatch")]
#[command(about = "Watches a directory and sorts newly arrived files into category subfolders")]
struct Cli {
	/// Sort into this fixed project root instead of the default downloads
	/// directory (enables project mode)
	#[arg(short, long)]
	project_root: Option<PathBuf>,

	/// Watch subdirectories as well
	#[arg(short, long, default_value_t = false)]
	recursive: bool,

	/// Capacity of the pending-sort queue; overflowing events are dropped
	#[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
	queue_capacity: usize,

	/// JSON file mapping extensions to category names, replacing the
	/// built-in table
	#[arg(long)]
	categories: Option<PathBuf>,

	/// Enable verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
	tracing_subscriber::fmt().with_max_level(level).init();

	let config = match cli.project_root {
		Some(root) => SorterConfig::with_project_root(root),
		None => SorterConfig::default(),
	};
	let watch_path = config.active_path()?;

	let table = match &cli.categories {
		Some(path) => CategoryTable::from_json_file(path)?,
		None => CategoryTable::default(),
	};
	info!("Category table loaded ({} extensions)", table.len());

	let (sort_queue, queue_rx) = queue::bounded(cli.queue_capacity);
	let worker = SorterWorker::new(
		queue_rx,
		FileMover::new(config.clone(), table),
		RetryPolicy::default(),
	);
	let worker_task = tokio::spawn(worker.run());

	let watch_config = WatchConfig { path: watch_path.clone(), recursive: cli.recursive };
	let (session, raw_events) = watcher::start(&watch_config)?;
	let filter_task = tokio::spawn(filter::run(raw_events, sort_queue));

	info!(
		"Watching folder: {:?} (project mode: {})",
		watch_path, config.project_mode
	);

	tokio::signal::ctrl_c().await?;
	info!("Shutting down");

	// Stopping the session closes the raw event stream; the filter then
	// drops its queue handle and the worker drains the remaining paths,
	// finishing any in-flight move before exiting.
	if let Err(e) = session.stop() {
		warn!("Error stopping watch session: {}", e);
	}
	filter_task.await?;
	worker_task.await?;

	Ok(())
}
