use crate::decode::DecodeError;
use std::path::PathBuf;

/// Library-level structured errors for envres.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
///
/// Every variant is fatal to resolution. Messages never carry secret values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Override file not found: {path}")]
	OverrideFileNotFound { path: PathBuf },

	#[error("Failed to read override file: {path}")]
	OverrideFileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Environment variable {name} is set but is not valid UTF-8")]
	EnvNotUnicode { name: String },

	#[error("Malformed line {line} in {path}: {reason}")]
	MalformedLine {
		path: PathBuf,
		line: usize,
		reason: String,
	},

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid value for {field}: expected {expected}, got {value:?}")]
	Cast {
		field: String,
		expected: &'static str,
		value: String,
	},

	#[error("Invalid connection URL in {field}")]
	Decode {
		field: String,
		#[source]
		source: DecodeError,
	},

	#[error("Duplicate field in schema: {name}")]
	DuplicateField { name: String },

	#[error("Invalid field name in schema: {name:?}")]
	InvalidFieldName { name: String },

	#[error("Failed to read schema file: {path}")]
	SchemaReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse schema file: {path}")]
	SchemaParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Command execution failed: {command}")]
	CommandFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Command not found: {command}")]
	CommandNotFound { command: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

impl ConfigError {
	/// The schema field this error concerns, if any.
	pub fn field(&self) -> Option<&str> {
		match self {
			ConfigError::MissingRequiredField { field }
			| ConfigError::Cast { field, .. }
			| ConfigError::Decode { field, .. } => Some(field.as_str()),
			_ => None,
		}
	}
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
