//! Common test utilities for the sortwatch integration suite

#![allow(dead_code)]

use sortwatch::RetryPolicy;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn setup_temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temp directory")
}

/// Create a test file with content
pub fn create_test_file(path: &Path, content: &str) -> std::io::Result<()> {
	std::fs::write(path, content)
}

/// Retry policy with millisecond delays so integration tests finish quickly
pub fn fast_policy() -> RetryPolicy {
	RetryPolicy {
		settle_delay: Duration::from_millis(10),
		retry_delay: Duration::from_millis(20),
		max_attempts: 5,
	}
}

/// Wait for a short duration to allow file system events to propagate
pub async fn wait_for_events() {
	tokio::time::sleep(Duration::from_millis(200)).await;
}

/// Poll until `path` exists or the timeout elapses; returns whether it
/// appeared in time
pub async fn wait_for_path(path: &Path, timeout: Duration) -> bool {
	let start = std::time::Instant::now();
	while start.elapsed() < timeout {
		if path.exists() {
			return true;
		}
		tokio::time::sleep(Duration::from_millis(50)).await;
	}
	path.exists()
}
