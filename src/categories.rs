//! Extension-based file categorization
//!
//! Maps a filename's extension to the destination subfolder name. The table
//! is immutable once built; unknown-but-present extensions fall back to the
//! catch-all category so the worker still files them instead of skipping.

use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Category assigned to any file whose extension is not in the table.
pub const FALLBACK_CATEGORY: &str = "Others";

/// Immutable extension → category lookup table.
#[derive(Debug, Clone)]
pub struct CategoryTable {
	extensions: HashMap<String, String>,
}

impl Default for CategoryTable {
	fn default() -> Self {
		let mut extensions = HashMap::new();
		let builtin: &[(&str, &str)] = &[
			("pdf", "Documents"),
			("doc", "Documents"),
			("docx", "Documents"),
			("txt", "Documents"),
			("csv", "Documents"),
			("pptx", "Documents"),
			("xlsx", "Documents"),
			("rtf", "Documents"),
			("jpg", "Images"),
			("jpeg", "Images"),
			("png", "Images"),
			("gif", "Images"),
			("bmp", "Images"),
			("tiff", "Images"),
			("webp", "Images"),
			("svg", "Images"),
			("mp4", "Videos"),
			("mov", "Videos"),
			("avi", "Videos"),
			("mkv", "Videos"),
			("webm", "Videos"),
			("mp3", "Audio"),
			("wav", "Audio"),
			("flac", "Audio"),
			("ogg", "Audio"),
			("zip", "Archives"),
			("rar", "Archives"),
			("7z", "Archives"),
			("tar", "Archives"),
			("gz", "Archives"),
			("exe", "Programs"),
			("msi", "Programs"),
			("dmg", "Programs"),
			("deb", "Programs"),
			("go", "Code"),
			("py", "Code"),
			("js", "Code"),
			("sh", "Code"),
		];
		for (ext, category) in builtin {
			extensions.insert((*ext).to_string(), (*category).to_string());
		}
		Self { extensions }
	}
}

impl CategoryTable {
	/// Load a custom table from a JSON object file mapping extensions to
	/// category names, e.g. `{"pdf": "Paperwork", "svg": "Vectors"}`.
	/// Keys are lowercased; a leading dot is tolerated.
	pub fn from_json_file(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)?;
		let parsed: HashMap<String, String> = serde_json::from_str(&raw)?;

		let extensions = parsed
			.into_iter()
			.map(|(ext, category)| (ext.trim_start_matches('.').to_lowercase(), category))
			.collect();

		Ok(Self { extensions })
	}

	/// Determine the category for a filename.
	///
	/// Returns `None` when the name has no extension (nothing after the last
	/// `.`), meaning the file is not categorizable and must be left alone.
	/// A non-empty extension missing from the table maps to
	/// [`FALLBACK_CATEGORY`].
	pub fn category_for(&self, filename: &str) -> Option<&str> {
		let (_, ext) = filename.rsplit_once('.')?;
		if ext.is_empty() {
			return None;
		}

		let ext = ext.to_lowercase();
		Some(
			self.extensions
				.get(&ext)
				.map(String::as_str)
				.unwrap_or(FALLBACK_CATEGORY),
		)
	}

	/// Number of known extensions.
	pub fn len(&self) -> usize {
		self.extensions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.extensions.is_empty()
	}
}
