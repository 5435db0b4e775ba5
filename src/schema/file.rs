use crate::error::{ConfigError, Result};
use crate::schema::types::{FieldSpec, Precedence, Schema};
use crate::source::OverrideFile;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for during schema discovery.
pub const SCHEMA_FILE_NAME: &str = ".envres.toml";

/// On-disk layout of a `.envres.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSchemaFile {
	/// Override file path, relative to the schema file's directory.
	#[serde(default)]
	override_file: Option<PathBuf>,

	/// Fail if the override file is missing.
	#[serde(default)]
	override_file_required: bool,

	#[serde(default)]
	precedence: Precedence,

	#[serde(default)]
	fields: Vec<FieldSpec>,
}

/// A loaded schema file with its source settings.
#[derive(Debug, Clone)]
pub struct SchemaFile {
	/// The path this schema was loaded from.
	pub path: PathBuf,

	/// Override file declared by the schema, path already made absolute
	/// relative to the schema's directory.
	pub override_file: Option<OverrideFile>,

	pub precedence: Precedence,

	pub schema: Schema,
}

/// Parse a schema file from the given path.
pub fn parse_schema_file(path: &Path) -> Result<SchemaFile> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::SchemaReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_schema_str(&content, path)
}

/// Parse a schema from a string (useful for testing).
pub fn parse_schema_str(content: &str, path: &Path) -> Result<SchemaFile> {
	let raw: RawSchemaFile =
		toml::from_str(content).map_err(|source| ConfigError::SchemaParseError {
			path: path.to_path_buf(),
			source,
		})?;

	let schema = Schema::new(raw.fields)?;

	let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
	let override_file = raw.override_file.map(|file| OverrideFile {
		path: base_dir.join(file),
		required: raw.override_file_required,
	});

	Ok(SchemaFile {
		path: path.to_path_buf(),
		override_file,
		precedence: raw.precedence,
		schema,
	})
}

/// Find the schema file that applies to `start_dir`.
///
/// Walks up from `start_dir` looking for `.envres.toml`; the nearest one
/// wins. Falls back to `~/.envres.toml`. Returns `None` if neither exists.
pub fn discover_schema_file(start_dir: &Path) -> Result<Option<PathBuf>> {
	for dir in start_dir.ancestors() {
		let candidate = dir.join(SCHEMA_FILE_NAME);
		if candidate.is_file() {
			debug!(path = %candidate.display(), "found schema file");
			return Ok(Some(candidate));
		}
	}

	let user_path = user_schema_path()?;
	if user_path.is_file() {
		debug!(path = %user_path.display(), "using user schema file");
		Ok(Some(user_path))
	} else {
		Ok(None)
	}
}

/// Convenience function to discover and parse the schema for a directory.
pub fn load_schema_file(start_dir: &Path) -> Result<Option<SchemaFile>> {
	discover_schema_file(start_dir)?
		.map(|path| parse_schema_file(&path))
		.transpose()
}

/// Get the path to the user's schema file.
pub fn user_schema_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(SCHEMA_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::types::FieldType;

	#[test]
	fn test_parse_empty_schema() {
		let path = PathBuf::from("test.toml");
		let file = parse_schema_str("", &path).unwrap();

		assert!(file.schema.is_empty());
		assert!(file.override_file.is_none());
		assert_eq!(file.precedence, Precedence::EnvironmentFirst);
	}

	#[test]
	fn test_parse_full_schema() {
		let content = r#"
override-file = ".env"
override-file-required = true
precedence = "override-file"

[[fields]]
name = "DEBUG"
type = "boolean"
default = false

[[fields]]
name = "WEB_CONCURRENCY"
type = "int"
default = 2

[[fields]]
name = "SECRET_KEY"
type = "string"
required = true
non-empty = true
secret = true

[[fields]]
name = "DATABASE_URL"
type = "url"
default = "postgres://localhost/app"
"#;
		let path = PathBuf::from("/srv/app/.envres.toml");
		let file = parse_schema_str(content, &path).unwrap();

		assert_eq!(file.precedence, Precedence::OverrideFileFirst);
		let override_file = file.override_file.unwrap();
		assert_eq!(override_file.path, PathBuf::from("/srv/app/.env"));
		assert!(override_file.required);

		let fields = file.schema.fields();
		assert_eq!(fields.len(), 4);
		assert_eq!(fields[0].field_type, FieldType::Boolean);
		assert_eq!(fields[0].default.as_deref(), Some("false"));
		assert_eq!(fields[1].field_type, FieldType::Integer);
		assert_eq!(fields[1].default.as_deref(), Some("2"));
		assert!(fields[2].required && fields[2].non_empty && fields[2].secret);
		assert_eq!(fields[3].field_type, FieldType::Url);
	}

	#[test]
	fn test_parse_rejects_unknown_keys() {
		let content = r#"
[[fields]]
name = "DEBUG"
type = "boolean"
requried = true
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_schema_str(content, &path);

		assert!(matches!(result, Err(ConfigError::SchemaParseError { .. })));
	}

	#[test]
	fn test_parse_rejects_duplicate_fields() {
		let content = r#"
[[fields]]
name = "PORT"
type = "integer"

[[fields]]
name = "PORT"
type = "string"
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_schema_str(content, &path);

		assert!(matches!(result, Err(ConfigError::DuplicateField { .. })));
	}

	#[test]
	fn test_discover_walks_up() {
		let temp_dir = tempfile::tempdir().unwrap();
		let nested = temp_dir.path().join("a").join("b");
		std::fs::create_dir_all(&nested).unwrap();
		let schema_path = temp_dir.path().join(SCHEMA_FILE_NAME);
		std::fs::write(&schema_path, "").unwrap();

		let found = discover_schema_file(&nested).unwrap();
		assert_eq!(found, Some(schema_path));
	}

	#[test]
	fn test_nearest_schema_wins() {
		let temp_dir = tempfile::tempdir().unwrap();
		let nested = temp_dir.path().join("service");
		std::fs::create_dir_all(&nested).unwrap();
		std::fs::write(temp_dir.path().join(SCHEMA_FILE_NAME), "").unwrap();
		std::fs::write(
			nested.join(SCHEMA_FILE_NAME),
			"[[fields]]\nname = \"PORT\"\ntype = \"integer\"\n",
		)
		.unwrap();

		let file = load_schema_file(&nested).unwrap().unwrap();
		assert_eq!(file.path, nested.join(SCHEMA_FILE_NAME));
		assert!(file.schema.contains("PORT"));
	}

	#[test]
	fn test_user_schema_path() {
		let path = user_schema_path().unwrap();
		assert!(path.ends_with(SCHEMA_FILE_NAME));
	}
}
