use std::fmt;
use std::path::PathBuf;

/// Where a raw entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
	Environment,
	OverrideFile,
}

/// An unvalidated key/value pair, alive only during resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct RawEntry {
	pub key: String,
	pub value: String,
	pub source: Source,
}

/// Values may be secrets, so `Debug` only shows their length.
impl fmt::Debug for RawEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RawEntry")
			.field("key", &self.key)
			.field("value", &format_args!("<{} bytes>", self.value.len()))
			.field("source", &self.source)
			.finish()
	}
}

/// An override file and whether its absence is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
	pub path: PathBuf,
	pub required: bool,
}

impl OverrideFile {
	/// A file that may be missing.
	pub fn optional(path: impl Into<PathBuf>) -> Self {
		OverrideFile {
			path: path.into(),
			required: false,
		}
	}

	/// A file whose absence fails resolution.
	pub fn required(path: impl Into<PathBuf>) -> Self {
		OverrideFile {
			path: path.into(),
			required: true,
		}
	}
}
