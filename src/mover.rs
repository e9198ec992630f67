//! Move execution
//!
//! One move attempt: categorize the file, ensure the destination category
//! directory exists, and rename the file into it. The outcome classification
//! drives the worker's retry loop.

use crate::categories::CategoryTable;
use crate::config::SorterConfig;
use crate::error::SorterError;
use crate::filter;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a single move attempt.
#[derive(Debug)]
pub enum MoveOutcome {
	/// File now lives at `destination` and no longer at the source.
	Moved { destination: PathBuf },
	/// Nothing to do; not an error.
	Skipped(SkipReason),
	/// File is locked or in use by another process; worth retrying.
	Busy,
	/// Unrecoverable for this file; reported, never retried.
	Fatal(SorterError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// Hidden file, editor backup, or partial download.
	TransientName,
	/// No extension to categorize by.
	NotCategorizable,
	/// Source vanished before the move; treated as already handled.
	SourceGone,
}

/// Seam between the worker and the filesystem. Tests script outcomes
/// against this to exercise retry and ordering behavior without real files.
pub trait MoveExecutor: Send {
	fn execute(&mut self, path: &Path) -> MoveOutcome;
}

/// Production executor moving files into category subfolders.
#[derive(Debug, Clone)]
pub struct FileMover {
	config: SorterConfig,
	table: CategoryTable,
}

impl FileMover {
	pub fn new(config: SorterConfig, table: CategoryTable) -> Self {
		Self { config, table }
	}

	fn destination_base(&self, source: &Path) -> Option<PathBuf> {
		if self.config.project_mode {
			if let Some(root) = &self.config.project_root {
				return Some(root.clone());
			}
		}
		source.parent().map(Path::to_path_buf)
	}
}

impl MoveExecutor for FileMover {
	fn execute(&mut self, path: &Path) -> MoveOutcome {
		let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
			return MoveOutcome::Skipped(SkipReason::NotCategorizable);
		};

		// The queue may hold paths enqueued before a filter-rule change, so
		// the same transient-name check applies here again.
		if filter::is_transient_name(filename) {
			return MoveOutcome::Skipped(SkipReason::TransientName);
		}

		let Some(category) = self.table.category_for(filename) else {
			return MoveOutcome::Skipped(SkipReason::NotCategorizable);
		};

		let Some(base) = self.destination_base(path) else {
			return MoveOutcome::Skipped(SkipReason::SourceGone);
		};
		let dest_dir = base.join(category);
		let dest_path = dest_dir.join(filename);

		if let Err(source) = std::fs::create_dir_all(&dest_dir) {
			return MoveOutcome::Fatal(SorterError::CreateDestDir {
				path: dest_dir.to_string_lossy().to_string(),
				source,
			});
		}

		match std::fs::rename(path, &dest_path) {
			Ok(()) => {
				info!("Sorted {} -> {:?}", filename, dest_path);
				MoveOutcome::Moved { destination: dest_path }
			}
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				MoveOutcome::Skipped(SkipReason::SourceGone)
			}
			Err(err) if is_busy_error(&err) => MoveOutcome::Busy,
			Err(source) => MoveOutcome::Fatal(SorterError::MoveFailed {
				path: path.to_string_lossy().to_string(),
				source,
			}),
		}
	}
}

/// Classify whether an io error means the file is locked or in use by
/// another process.
///
/// Prefers the structured OS error code; the substring match on platform
/// phrasing is a documented last resort kept in this one place.
fn is_busy_error(err: &io::Error) -> bool {
	if let Some(code) = err.raw_os_error() {
		#[cfg(unix)]
		{
			// EBUSY, ETXTBSY
			if code == 16 || code == 26 {
				return true;
			}
		}
		#[cfg(windows)]
		{
			// ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
			if code == 32 || code == 33 {
				return true;
			}
		}
		let _ = code;
	}

	let text = err.to_string().to_lowercase();
	text.contains("resource busy")
		|| text.contains("device or resource busy")
		|| text.contains("access is denied")
		|| text.contains("being used by another process")
}
