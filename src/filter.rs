//! Event filtering and enqueuing
//!
//! Consumes the raw event stream from the watch session, drops noise
//! (hidden files, partial downloads, editor backups, directories) and offers
//! the surviving paths to the bounded sort queue.

use crate::events::{RawEvent, RawEventKind};
use crate::queue::{Offer, SortQueue};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

/// Suffixes browsers append to in-progress downloads.
pub const PARTIAL_DOWNLOAD_SUFFIXES: &[&str] = &[".part", ".crdownload"];

/// Generic in-progress marker seen anywhere in the name.
pub const IN_PROGRESS_MARKER: &str = ".download";

/// Whether a base filename should never be sorted: hidden files, editor
/// backups, and partial downloads. Shared with the move executor as defense
/// in depth, since the queue may hold paths enqueued under older rules.
pub fn is_transient_name(filename: &str) -> bool {
	if filename.starts_with('.') || filename.ends_with('~') {
		return true;
	}
	if PARTIAL_DOWNLOAD_SUFFIXES
		.iter()
		.any(|suffix| filename.ends_with(suffix))
	{
		return true;
	}
	filename.contains(IN_PROGRESS_MARKER)
}

/// Run the filter loop until the raw event stream closes.
///
/// Never blocks on queue capacity: overflow drops the event (the queue logs
/// the drop) and the loop keeps consuming.
pub async fn run(mut events: mpsc::UnboundedReceiver<RawEvent>, queue: SortQueue) {
	while let Some(event) = events.recv().await {
		if let Ok(json) = event.to_json() {
			trace!("Raw event: {}", json);
		}

		if !matches!(event.kind, RawEventKind::Create | RawEventKind::Write) {
			continue;
		}
		if event.is_directory {
			continue;
		}

		let Some(filename) = event.path.file_name().and_then(|n| n.to_str()) else {
			continue;
		};
		if is_transient_name(filename) {
			trace!("Ignoring transient file: {}", filename);
			continue;
		}

		match queue.offer(event.path.clone()) {
			Offer::Enqueued => info!("Queued {} for sorting", filename),
			Offer::DroppedFull => {} // already logged by the queue
			Offer::Closed => {
				debug!("Sort queue closed, stopping event filter");
				break;
			}
		}
	}

	debug!("Event filter loop ended");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::queue;
	use std::path::PathBuf;

	fn event(kind: RawEventKind, path: &str) -> RawEvent {
		RawEvent::new(kind, PathBuf::from(path), false)
	}

	#[test]
	fn test_transient_names() {
		assert!(is_transient_name(".hidden"));
		assert!(is_transient_name(".tmp.crdownload"));
		assert!(is_transient_name("notes.txt~"));
		assert!(is_transient_name("movie.mkv.part"));
		assert!(is_transient_name("setup.exe.crdownload"));
		assert!(is_transient_name("file.download.bin"));

		assert!(!is_transient_name("report.pdf"));
		assert!(!is_transient_name("partly.txt"));
		assert!(!is_transient_name("downloads.csv"));
	}

	#[tokio::test]
	async fn test_only_create_and_write_qualify() {
		let (sort_queue, mut rx) = queue::bounded(8);
		let (tx, events) = mpsc::unbounded_channel();

		tx.send(event(RawEventKind::Other, "/d/removed.pdf")).unwrap();
		tx.send(event(RawEventKind::Create, "/d/kept.pdf")).unwrap();
		tx.send(event(RawEventKind::Write, "/d/written.pdf")).unwrap();
		drop(tx);

		run(events, sort_queue).await;

		assert_eq!(rx.recv().await.unwrap(), PathBuf::from("/d/kept.pdf"));
		assert_eq!(rx.recv().await.unwrap(), PathBuf::from("/d/written.pdf"));
		assert!(rx.try_recv().is_err());
	}

	#[tokio::test]
	async fn test_transient_files_never_enqueued() {
		let (sort_queue, mut rx) = queue::bounded(8);
		let (tx, events) = mpsc::unbounded_channel();

		for name in [".tmp.crdownload", ".DS_Store", "draft.txt~", "iso.part"] {
			tx.send(event(RawEventKind::Create, &format!("/d/{name}"))).unwrap();
			tx.send(event(RawEventKind::Write, &format!("/d/{name}"))).unwrap();
		}
		drop(tx);

		run(events, sort_queue).await;
		assert!(rx.try_recv().is_err());
	}

	#[tokio::test]
	async fn test_directory_events_ignored() {
		let (sort_queue, mut rx) = queue::bounded(8);
		let (tx, events) = mpsc::unbounded_channel();

		tx.send(RawEvent::new(
			RawEventKind::Create,
			PathBuf::from("/d/Documents"),
			true,
		))
		.unwrap();
		drop(tx);

		run(events, sort_queue).await;
		assert!(rx.try_recv().is_err());
	}

	#[tokio::test]
	async fn test_overflow_keeps_filter_running() {
		let (sort_queue, mut rx) = queue::bounded(1);
		let (tx, events) = mpsc::unbounded_channel();

		tx.send(event(RawEventKind::Create, "/d/first.pdf")).unwrap();
		tx.send(event(RawEventKind::Create, "/d/dropped.pdf")).unwrap();
		tx.send(event(RawEventKind::Create, "/d/also-dropped.pdf")).unwrap();
		drop(tx);

		run(events, sort_queue).await;

		// Only the first path fit; the rest were dropped, not queued late.
		assert_eq!(rx.recv().await.unwrap(), PathBuf::from("/d/first.pdf"));
		assert!(rx.try_recv().is_err());
	}
}
