//! Watch session
//!
//! Owns the notify subscription for one root directory and translates raw
//! notifications into the [`RawEvent`] stream consumed by the event filter.
//! Notify-level errors are logged on their own channel and never terminate
//! the stream; a missing watch target is a startup-fatal condition.

use crate::error::{Result, SorterError};
use crate::events::{RawEvent, RawEventKind};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct WatchConfig {
	pub path: PathBuf,
	pub recursive: bool,
}

/// Handle to a running watch session. Dropping (or calling [`stop`]) tears
/// the subscription down, which closes the event stream and lets the rest
/// of the pipeline drain.
///
/// [`stop`]: WatchSession::stop
pub struct WatchSession {
	watcher: RecommendedWatcher,
	path: PathBuf,
}

impl WatchSession {
	pub fn stop(mut self) -> Result<()> {
		self.watcher.unwatch(&self.path)?;
		info!("Stopped watching {:?}", self.path);
		Ok(())
	}
}

/// Subscribe to filesystem notifications for `config.path`.
///
/// Returns the session handle and the raw event stream. The stream closes
/// when the session is stopped or dropped.
pub fn start(config: &WatchConfig) -> Result<(WatchSession, tokio_mpsc::UnboundedReceiver<RawEvent>)> {
	if !config.path.is_dir() {
		return Err(SorterError::WatchTargetMissing {
			path: config.path.to_string_lossy().to_string(),
		});
	}

	info!(
		"Starting to watch path: {:?} (recursive: {})",
		config.path, config.recursive
	);

	// notify delivers on a std channel; a blocking task forwards into the
	// async side.
	let (notify_tx, notify_rx) = mpsc::channel();
	let (event_tx, event_rx) = tokio_mpsc::unbounded_channel();

	let mut watcher = RecommendedWatcher::new(
		notify_tx,
		Config::default().with_poll_interval(Duration::from_millis(100)),
	)?;

	let mode = if config.recursive {
		RecursiveMode::Recursive
	} else {
		RecursiveMode::NonRecursive
	};
	watcher.watch(&config.path, mode)?;

	tokio::task::spawn_blocking(move || forward_notify_events(notify_rx, event_tx));

	Ok((WatchSession { watcher, path: config.path.clone() }, event_rx))
}

/// Pump the notify channel until it closes, converting each notification
/// into a [`RawEvent`]. Runs on a blocking thread since notify uses
/// `std::sync::mpsc`.
fn forward_notify_events(
	notify_rx: mpsc::Receiver<notify::Result<Event>>,
	event_tx: tokio_mpsc::UnboundedSender<RawEvent>,
) {
	for result in notify_rx {
		match result {
			Ok(event) => {
				let kind = RawEventKind::from(event.kind);
				for path in event.paths {
					let raw = convert_notify_path(kind, path);
					if event_tx.send(raw).is_err() {
						debug!("Raw event receiver dropped, stopping forwarder");
						return;
					}
				}
			}
			// Subscription-level errors (e.g. overflow, watched dir
			// removed) are logged but do not end the stream.
			Err(e) => error!("Watch error: {}", e),
		}
	}
	debug!("Notify channel closed, forwarder exiting");
}

fn convert_notify_path(kind: RawEventKind, path: PathBuf) -> RawEvent {
	// For paths that already vanished the metadata query fails; treat them
	// as files and let the move executor classify the miss.
	let is_directory = std::fs::metadata(&path)
		.map(|m| m.is_dir())
		.unwrap_or(false);

	RawEvent::new(kind, path, is_directory)
}
