use crate::error::{ConfigError, Result};
use crate::schema::is_valid_field_name;
use crate::source::types::{OverrideFile, RawEntry, Source};
use std::path::Path;
use tracing::debug;

/// Read an override file, honouring its `required` flag.
pub fn load_override_file(file: &OverrideFile) -> Result<Vec<RawEntry>> {
	match std::fs::read_to_string(&file.path) {
		Ok(content) => {
			let entries = parse_override_str(&content, &file.path)?;
			debug!(path = %file.path.display(), entries = entries.len(), "loaded override file");
			Ok(entries)
		}
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
			if file.required {
				Err(ConfigError::OverrideFileNotFound {
					path: file.path.clone(),
				})
			} else {
				debug!(path = %file.path.display(), "optional override file not found");
				Ok(Vec::new())
			}
		}
		Err(source) => Err(ConfigError::OverrideFileRead {
			path: file.path.clone(),
			source,
		}),
	}
}

/// Parse `KEY=VALUE` lines.
///
/// Blank lines and lines starting with `#` are skipped. Values are taken
/// verbatim after the first `=`; no quoting or escaping is processed, and a
/// value with leading or trailing whitespace is rejected rather than trimmed.
pub fn parse_override_str(content: &str, path: &Path) -> Result<Vec<RawEntry>> {
	let content = content.strip_prefix('\u{feff}').unwrap_or(content);
	let mut entries = Vec::new();

	for (index, line) in content.lines().enumerate() {
		let line_no = index + 1;
		let trimmed = line.trim_start();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			continue;
		}

		let malformed = |reason: String| ConfigError::MalformedLine {
			path: path.to_path_buf(),
			line: line_no,
			reason,
		};

		let (key, value) = line
			.split_once('=')
			.ok_or_else(|| malformed("missing '='".to_string()))?;

		if !is_valid_field_name(key) {
			return Err(malformed(format!("invalid key {key:?}")));
		}
		if value.trim() != value {
			return Err(malformed(format!(
				"value of {key} has leading or trailing whitespace"
			)));
		}

		entries.push(RawEntry {
			key: key.to_string(),
			value: value.to_string(),
			source: Source::OverrideFile,
		});
	}

	Ok(entries)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn parse(content: &str) -> Result<Vec<RawEntry>> {
		parse_override_str(content, &PathBuf::from(".env"))
	}

	fn malformed_line(result: Result<Vec<RawEntry>>) -> (usize, String) {
		match result {
			Err(ConfigError::MalformedLine { line, reason, .. }) => (line, reason),
			other => panic!("Expected MalformedLine error, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_pairs_comments_and_blanks() {
		let content = "# local settings\n\nDEBUG=True\n   \n  # indented comment\nDATABASE_URL=postgres://localhost/app?sslmode=disable\n";
		let entries = parse(content).unwrap();

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].key, "DEBUG");
		assert_eq!(entries[0].value, "True");
		assert_eq!(entries[0].source, Source::OverrideFile);
		assert_eq!(entries[1].value, "postgres://localhost/app?sslmode=disable");
	}

	#[test]
	fn test_parse_value_is_verbatim() {
		let entries = parse("SECRET_KEY=\"a=b#c\"\nEMPTY=\r\n").unwrap();

		assert_eq!(entries[0].value, "\"a=b#c\"");
		assert_eq!(entries[1].key, "EMPTY");
		assert_eq!(entries[1].value, "");
	}

	#[test]
	fn test_parse_crlf_and_bom() {
		let entries = parse("\u{feff}DEBUG=1\r\nPORT=8000\r\n").unwrap();

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].key, "DEBUG");
		assert_eq!(entries[1].value, "8000");
	}

	#[test]
	fn test_parse_missing_equals() {
		let (line, reason) = malformed_line(parse("DEBUG=1\nJUST_A_KEY\n"));

		assert_eq!(line, 2);
		assert_eq!(reason, "missing '='");
	}

	#[test]
	fn test_parse_rejects_surrounding_whitespace() {
		let (line, _) = malformed_line(parse("DEBUG= true\n"));
		assert_eq!(line, 1);

		let (_, reason) = malformed_line(parse("DEBUG=true \n"));
		assert!(reason.contains("whitespace"));

		let (_, reason) = malformed_line(parse("DEBUG =true\n"));
		assert!(reason.contains("invalid key"));
	}

	#[test]
	fn test_whitespace_error_does_not_echo_value() {
		let (_, reason) = malformed_line(parse("SECRET_KEY= hunter2\n"));
		assert!(!reason.contains("hunter2"));
	}

	#[test]
	fn test_load_optional_missing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let file = OverrideFile::optional(temp_dir.path().join(".env"));

		assert!(load_override_file(&file).unwrap().is_empty());
	}

	#[test]
	fn test_load_required_missing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let file = OverrideFile::required(temp_dir.path().join(".env"));

		assert!(matches!(
			load_override_file(&file),
			Err(ConfigError::OverrideFileNotFound { .. })
		));
	}

	#[test]
	fn test_load_existing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".env");
		std::fs::write(&path, "DEBUG=off\n").unwrap();

		let entries = load_override_file(&OverrideFile::required(&path)).unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].value, "off");
	}
}
