//! Sorter worker
//!
//! Single long-running consumer of the sort queue. Each dequeued path is
//! processed to completion before the next is taken, so at most one move is
//! ever in flight and destination paths cannot race. Per-attempt sleeps are
//! local to this task and never stall the watch session's enqueuing.

use crate::config::RetryPolicy;
use crate::mover::{MoveExecutor, MoveOutcome};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub struct SorterWorker<M: MoveExecutor> {
	queue: mpsc::Receiver<PathBuf>,
	mover: M,
	policy: RetryPolicy,
}

impl<M: MoveExecutor> SorterWorker<M> {
	pub fn new(queue: mpsc::Receiver<PathBuf>, mover: M, policy: RetryPolicy) -> Self {
		Self { queue, mover, policy }
	}

	/// Consume the queue until it closes, then drain and return.
	pub async fn run(mut self) {
		info!("Sorter worker started");

		while let Some(path) = self.queue.recv().await {
			self.process(&path).await;
		}

		info!("Sort queue closed, sorter worker exiting");
	}

	/// Process one path to completion: settle, then attempt the move with
	/// bounded retries on busy outcomes. Nothing here escalates beyond a
	/// log line; one bad file must never halt the worker.
	async fn process(&mut self, path: &Path) {
		// Give the producing application time to finish writing and
		// release the file before the first attempt.
		tokio::time::sleep(self.policy.settle_delay).await;

		for attempt in 1..=self.policy.max_attempts {
			match self.mover.execute(path) {
				MoveOutcome::Moved { destination } => {
					debug!("Move complete: {:?} -> {:?}", path, destination);
					return;
				}
				MoveOutcome::Skipped(reason) => {
					debug!("Skipping {:?}: {:?}", path, reason);
					return;
				}
				MoveOutcome::Busy => {
					if attempt == self.policy.max_attempts {
						warn!(
							"Giving up on {:?}: still busy after {} attempts",
							path, attempt
						);
						return;
					}
					debug!(
						"Retry #{} for {:?}: file busy, waiting {:?}",
						attempt, path, self.policy.retry_delay
					);
					tokio::time::sleep(self.policy.retry_delay).await;
				}
				MoveOutcome::Fatal(err) => {
					error!("Sort error for {:?} [{}]: {}", path, err.category(), err);
					return;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SorterError;
	use std::collections::VecDeque;
	use std::sync::{Arc, Mutex};
	use std::time::Duration;
	use tokio::time::Instant;

	/// Scripted executor: pops the next outcome per call and records what
	/// was attempted and when (under tokio's paused clock).
	struct ScriptedMover {
		script: VecDeque<MoveOutcome>,
		attempts: Arc<Mutex<Vec<(PathBuf, Instant)>>>,
	}

	impl ScriptedMover {
		fn new(script: Vec<MoveOutcome>) -> (Self, Arc<Mutex<Vec<(PathBuf, Instant)>>>) {
			let attempts = Arc::new(Mutex::new(Vec::new()));
			(
				Self { script: script.into(), attempts: attempts.clone() },
				attempts,
			)
		}
	}

	impl MoveExecutor for ScriptedMover {
		fn execute(&mut self, path: &Path) -> MoveOutcome {
			self.attempts
				.lock()
				.unwrap()
				.push((path.to_path_buf(), Instant::now()));
			self.script.pop_front().unwrap_or(MoveOutcome::Moved {
				destination: path.to_path_buf(),
			})
		}
	}

	fn fast_policy() -> RetryPolicy {
		RetryPolicy {
			settle_delay: Duration::from_secs(1),
			retry_delay: Duration::from_secs(2),
			max_attempts: 5,
		}
	}

	async fn run_worker(script: Vec<MoveOutcome>, paths: Vec<&str>) -> Vec<(PathBuf, Instant)> {
		let (tx, rx) = mpsc::channel(16);
		let (mover, attempts) = ScriptedMover::new(script);
		let worker = SorterWorker::new(rx, mover, fast_policy());

		for path in paths {
			tx.send(PathBuf::from(path)).await.unwrap();
		}
		drop(tx);
		worker.run().await;

		let recorded = attempts.lock().unwrap().clone();
		recorded
	}

	#[tokio::test(start_paused = true)]
	async fn test_settle_delay_before_first_attempt() {
		let start = Instant::now();
		let attempts = run_worker(vec![], vec!["/d/a.pdf"]).await;

		assert_eq!(attempts.len(), 1);
		assert!(attempts[0].1 - start >= Duration::from_secs(1));
	}

	#[tokio::test(start_paused = true)]
	async fn test_busy_then_success_retries_with_backoff() {
		let script = vec![
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			MoveOutcome::Moved { destination: PathBuf::from("/d/Archives/archive.zip") },
		];
		let attempts = run_worker(script, vec!["/d/archive.zip"]).await;

		assert_eq!(attempts.len(), 4);
		for pair in attempts.windows(2) {
			assert!(pair[1].1 - pair[0].1 >= Duration::from_secs(2));
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_busy_exhaustion_abandons_without_escalation() {
		let script = vec![
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			// If the worker attempted a sixth time it would consume this
			// and the count below would catch it.
			MoveOutcome::Busy,
		];
		let attempts = run_worker(script, vec!["/d/locked.zip"]).await;
		assert_eq!(attempts.len(), 5);
	}

	#[tokio::test(start_paused = true)]
	async fn test_fatal_stops_path_but_not_worker() {
		let script = vec![
			MoveOutcome::Fatal(SorterError::MoveFailed {
				path: "/d/bad.pdf".to_string(),
				source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
			}),
			MoveOutcome::Moved { destination: PathBuf::from("/d/Documents/good.pdf") },
		];
		let attempts = run_worker(script, vec!["/d/bad.pdf", "/d/good.pdf"]).await;

		// One attempt for the fatal path (no retry), then the next path.
		assert_eq!(attempts.len(), 2);
		assert_eq!(attempts[0].0, PathBuf::from("/d/bad.pdf"));
		assert_eq!(attempts[1].0, PathBuf::from("/d/good.pdf"));
	}

	#[tokio::test(start_paused = true)]
	async fn test_paths_processed_strictly_in_order() {
		let script = vec![
			MoveOutcome::Busy,
			MoveOutcome::Busy,
			MoveOutcome::Moved { destination: PathBuf::from("/d/Documents/p1.pdf") },
			MoveOutcome::Moved { destination: PathBuf::from("/d/Documents/p2.pdf") },
		];
		let attempts = run_worker(script, vec!["/d/p1.pdf", "/d/p2.pdf"]).await;

		// All of p1's attempts (including retries) complete before p2's
		// first attempt begins.
		assert_eq!(attempts.len(), 4);
		assert!(attempts[..3].iter().all(|(p, _)| p == &PathBuf::from("/d/p1.pdf")));
		assert_eq!(attempts[3].0, PathBuf::from("/d/p2.pdf"));
		assert!(attempts[3].1 >= attempts[2].1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_skipped_ends_processing_immediately() {
		let script = vec![MoveOutcome::Skipped(crate::mover::SkipReason::SourceGone)];
		let attempts = run_worker(script, vec!["/d/gone.pdf"]).await;
		assert_eq!(attempts.len(), 1);
	}
}
