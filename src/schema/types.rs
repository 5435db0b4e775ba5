use crate::error::{ConfigError, Result};
use crate::source::Source;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static FIELD_NAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern is valid"));

/// Check that a name is usable as an environment variable and override-file key.
pub fn is_valid_field_name(name: &str) -> bool {
	FIELD_NAME.is_match(name)
}

/// Target type a raw string is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	#[serde(alias = "bool")]
	Boolean,
	#[serde(alias = "int")]
	Integer,
	String,
	/// Connection URL, decoded into a `ConnectionDescriptor`.
	Url,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Boolean => "boolean",
			FieldType::Integer => "integer",
			FieldType::String => "string",
			FieldType::Url => "url",
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Contract for one configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FieldSpec {
	/// Environment variable / override-file key. Case-sensitive.
	pub name: String,

	#[serde(rename = "type")]
	pub field_type: FieldType,

	/// Raw default, cast the same way as a sourced value.
	#[serde(default, deserialize_with = "deserialize_default")]
	pub default: Option<String>,

	/// Fail resolution if no source and no default supply a value.
	#[serde(default)]
	pub required: bool,

	/// Reject the empty string (string fields only).
	#[serde(default)]
	pub non_empty: bool,

	/// Never show the value in diagnostics or `show` output.
	#[serde(default)]
	pub secret: bool,
}

impl FieldSpec {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		FieldSpec {
			name: name.into(),
			field_type,
			default: None,
			required: false,
			non_empty: false,
			secret: false,
		}
	}

	pub fn with_default(mut self, default: impl Into<String>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn non_empty(mut self) -> Self {
		self.non_empty = true;
		self
	}

	pub fn secret(mut self) -> Self {
		self.secret = true;
		self
	}
}

/// Defaults may be written as native TOML scalars; they are kept as raw text.
#[derive(Deserialize)]
#[serde(untagged)]
enum DefaultLiteral {
	Bool(bool),
	Int(i64),
	Str(String),
}

fn deserialize_default<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let literal = DefaultLiteral::deserialize(deserializer)?;
	Ok(Some(match literal {
		DefaultLiteral::Bool(b) => b.to_string(),
		DefaultLiteral::Int(i) => i.to_string(),
		DefaultLiteral::Str(s) => s,
	}))
}

/// Validated, ordered set of field specs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
	fields: Vec<FieldSpec>,
}

impl Schema {
	/// Build a schema, rejecting invalid and duplicate names.
	pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !is_valid_field_name(&field.name) {
				return Err(ConfigError::InvalidFieldName {
					name: field.name.clone(),
				});
			}
			if !seen.insert(field.name.as_str()) {
				return Err(ConfigError::DuplicateField {
					name: field.name.clone(),
				});
			}
		}
		Ok(Schema { fields })
	}

	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.field(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

/// Which source wins when a key is present in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Precedence {
	/// Environment variables override the override file.
	#[default]
	#[serde(rename = "environment")]
	EnvironmentFirst,

	/// The override file overrides environment variables.
	#[serde(rename = "override-file")]
	OverrideFileFirst,
}

impl Precedence {
	/// Sources from highest to lowest priority.
	pub fn order(&self) -> [Source; 2] {
		match self {
			Precedence::EnvironmentFirst => [Source::Environment, Source::OverrideFile],
			Precedence::OverrideFileFirst => [Source::OverrideFile, Source::Environment],
		}
	}
}
