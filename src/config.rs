use crate::error::{Result, SorterError};
use std::path::PathBuf;
use std::time::Duration;

/// Default capacity of the bounded sort queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 500;

/// Active configuration for one watch session. Read-only once the session
/// is running.
#[derive(Debug, Clone, Default)]
pub struct SorterConfig {
	/// When set, all sorted files land under the project root's category
	/// subfolders and the project root is the watched directory.
	pub project_mode: bool,
	pub project_root: Option<PathBuf>,
}

impl SorterConfig {
	pub fn with_project_root(root: PathBuf) -> Self {
		Self { project_mode: true, project_root: Some(root) }
	}

	/// The directory to watch and sort within: the project root in project
	/// mode, otherwise the user's default downloads directory.
	pub fn active_path(&self) -> Result<PathBuf> {
		if self.project_mode {
			if let Some(root) = &self.project_root {
				return Ok(root.clone());
			}
		}
		default_download_dir()
	}
}

/// Timing policy for the sorter worker's move attempts.
///
/// These are deliberate, tunable policy values rather than literals: the
/// settle delay gives the producing application (a browser, typically) time
/// to finish writing and close the file, and the retry delay paces attempts
/// against a file that is still locked.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	/// Wait before the first move attempt on a freshly observed path.
	pub settle_delay: Duration,
	/// Wait between attempts after a busy outcome.
	pub retry_delay: Duration,
	/// Maximum move attempts per path before giving up.
	pub max_attempts: u32,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			settle_delay: Duration::from_secs(1),
			retry_delay: Duration::from_secs(2),
			max_attempts: 5,
		}
	}
}

impl RetryPolicy {
	pub fn validate(&self) -> std::result::Result<(), String> {
		if self.max_attempts == 0 {
			return Err("max_attempts must be greater than 0".to_string());
		}
		Ok(())
	}
}

/// Resolve the platform default downloads directory: `<home>/Downloads`.
///
/// Failure to resolve the home directory, or running on a platform without a
/// conventional downloads location, is a startup-fatal condition.
pub fn default_download_dir() -> Result<PathBuf> {
	let home = home_dir().ok_or(SorterError::HomeDirUnavailable)?;

	match std::env::consts::OS {
		"linux" | "macos" | "windows" => Ok(home.join("Downloads")),
		other => Err(SorterError::UnsupportedPlatform { os: other.to_string() }),
	}
}

fn home_dir() -> Option<PathBuf> {
	#[cfg(windows)]
	let var = "USERPROFILE";
	#[cfg(not(windows))]
	let var = "HOME";

	std::env::var_os(var)
		.filter(|value| !value.is_empty())
		.map(PathBuf::from)
}
