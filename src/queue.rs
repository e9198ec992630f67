//! Bounded handoff between the event filter and the sorter worker
//!
//! Single synchronization point of the pipeline: non-blocking push on the
//! producer side (overflow drops the path with a warning, never stalling the
//! watch session) and blocking pop on the single consumer side.

use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::warn;

/// Result of offering a path to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
	Enqueued,
	/// Queue at capacity; the path was dropped. Freshness over completeness:
	/// a dropped sort can be corrected by a later event or a manual move,
	/// a blocked watcher cannot.
	DroppedFull,
	/// Consumer gone; shutdown in progress.
	Closed,
}

/// Producer handle for the bounded sort queue.
#[derive(Debug, Clone)]
pub struct SortQueue {
	tx: mpsc::Sender<PathBuf>,
}

/// Create the queue, returning the producer handle and the consumer side.
pub fn bounded(capacity: usize) -> (SortQueue, mpsc::Receiver<PathBuf>) {
	let (tx, rx) = mpsc::channel(capacity);
	(SortQueue { tx }, rx)
}

impl SortQueue {
	/// Offer a path without ever blocking the caller.
	pub fn offer(&self, path: PathBuf) -> Offer {
		match self.tx.try_send(path) {
			Ok(()) => Offer::Enqueued,
			Err(mpsc::error::TrySendError::Full(path)) => {
				warn!("Sort queue full, dropping event for {:?}", path);
				Offer::DroppedFull
			}
			Err(mpsc::error::TrySendError::Closed(_)) => Offer::Closed,
		}
	}

	pub fn capacity(&self) -> usize {
		self.tx.max_capacity()
	}
}
