use thiserror::Error;

/// Core sorter error types
///
/// Per-file move failures are carried inside `MoveOutcome::Fatal` and logged
/// by the worker; the variants here also cover the conditions that abort
/// process startup (missing home directory, missing watch target, watcher
/// creation failure).
#[derive(Error, Debug)]
pub enum SorterError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Home directory could not be resolved")]
	HomeDirUnavailable,

	#[error("Unsupported platform: {os}")]
	UnsupportedPlatform { os: String },

	#[error("Watch target not found: {path} (create it or adjust the configuration)")]
	WatchTargetMissing { path: String },

	#[error("Failed to create destination directory {path}: {source}")]
	CreateDestDir {
		path: String,
		source: std::io::Error,
	},

	#[error("Move failed for {path}: {source}")]
	MoveFailed {
		path: String,
		source: std::io::Error,
	},
}

impl SorterError {
	/// Whether this error should abort process startup rather than be
	/// handled per-file by the worker.
	pub fn is_startup_fatal(&self) -> bool {
		matches!(
			self,
			SorterError::HomeDirUnavailable
				| SorterError::UnsupportedPlatform { .. }
				| SorterError::WatchTargetMissing { .. }
				| SorterError::Notify(_)
		)
	}

	/// Get error category for logging
	pub fn category(&self) -> &'static str {
		match self {
			SorterError::Io(_) => "io",
			SorterError::Notify(_) => "notify",
			SorterError::Json(_) => "serialization",
			SorterError::HomeDirUnavailable => "configuration",
			SorterError::UnsupportedPlatform { .. } => "configuration",
			SorterError::WatchTargetMissing { .. } => "configuration",
			SorterError::CreateDestDir { .. } => "filesystem",
			SorterError::MoveFailed { .. } => "filesystem",
		}
	}
}

pub type Result<T> = std::result::Result<T, SorterError>;
