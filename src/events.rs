use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Event kinds the sorter cares about. Everything that is neither a
/// creation nor a content write collapses into `Other` and is discarded
/// by the event filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RawEventKind {
	Create,
	Write,
	Other,
}

impl From<notify::EventKind> for RawEventKind {
	fn from(kind: notify::EventKind) -> Self {
		match kind {
			notify::EventKind::Create(_) => RawEventKind::Create,
			notify::EventKind::Modify(modify_kind) => match modify_kind {
				// Renames are not sort triggers; the sorter's own moves
				// would otherwise echo back as events.
				notify::event::ModifyKind::Name(_) => RawEventKind::Other,
				_ => RawEventKind::Write,
			},
			_ => RawEventKind::Other,
		}
	}
}

/// One raw filesystem notification, as delivered by the watch session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
	pub id: Uuid,
	pub kind: RawEventKind,
	pub path: PathBuf,
	pub timestamp: DateTime<Utc>,
	pub is_directory: bool,
}

impl RawEvent {
	pub fn new(kind: RawEventKind, path: PathBuf, is_directory: bool) -> Self {
		Self {
			id: Uuid::new_v4(),
			kind,
			path,
			timestamp: Utc::now(),
			is_directory,
		}
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}
