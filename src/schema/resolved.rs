use crate::decode::ConnectionDescriptor;
use crate::source::Source;
use std::fmt;

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Bool(bool),
	Int(i64),
	Str(String),
	Connection(ConnectionDescriptor),
}

impl Value {
	/// Canonical text form, including any password. Not for display.
	pub fn to_raw_string(&self) -> String {
		match self {
			Value::Bool(b) => b.to_string(),
			Value::Int(i) => i.to_string(),
			Value::Str(s) => s.clone(),
			Value::Connection(desc) => desc.to_url(),
		}
	}
}

/// Connection values render with the password redacted.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Bool(b) => write!(f, "{b}"),
			Value::Int(i) => write!(f, "{i}"),
			Value::Str(s) => write!(f, "{s:?}"),
			Value::Connection(desc) => write!(f, "{desc}"),
		}
	}
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
	Environment,
	OverrideFile,
	Default,
}

impl From<Source> for Provenance {
	fn from(source: Source) -> Self {
		match source {
			Source::Environment => Provenance::Environment,
			Source::OverrideFile => Provenance::OverrideFile,
		}
	}
}

impl fmt::Display for Provenance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Provenance::Environment => "environment",
			Provenance::OverrideFile => "override file",
			Provenance::Default => "default",
		})
	}
}

/// One resolved field.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedField {
	pub name: String,
	pub value: Value,
	pub provenance: Provenance,
	/// Copied from the field spec so display code can redact.
	pub secret: bool,
	/// Text the value was cast from. May hold a password.
	pub(crate) raw: String,
}

// `raw` is left out so a URL password never reaches debug output.
impl fmt::Debug for ResolvedField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResolvedField")
			.field("name", &self.name)
			.field("value", &self.value)
			.field("provenance", &self.provenance)
			.field("secret", &self.secret)
			.finish_non_exhaustive()
	}
}

impl ResolvedField {
	/// Value as handed to a child process.
	///
	/// URL fields keep the text the user wrote; other types use their
	/// canonical form.
	pub fn export_value(&self) -> String {
		match self.value {
			Value::Connection(_) => self.raw.clone(),
			_ => self.value.to_raw_string(),
		}
	}

	/// Value as safe to print: secrets are masked, passwords redacted.
	pub fn display_value(&self) -> String {
		if self.secret && !matches!(self.value, Value::Connection(_)) {
			"<redacted>".to_string()
		} else {
			self.value.to_string()
		}
	}
}

/// Immutable result of resolution, in schema order.
///
/// Optional fields with neither a value nor a default are absent. There is
/// no way to modify a `ResolvedConfig`; resolve again to get a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
	fields: Vec<ResolvedField>,
}

impl ResolvedConfig {
	pub(crate) fn new(fields: Vec<ResolvedField>) -> Self {
		ResolvedConfig { fields }
	}

	pub fn get(&self, name: &str) -> Option<&ResolvedField> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn value(&self, name: &str) -> Option<&Value> {
		self.get(name).map(|f| &f.value)
	}

	pub fn provenance(&self, name: &str) -> Option<Provenance> {
		self.get(name).map(|f| f.provenance)
	}

	pub fn bool(&self, name: &str) -> Option<bool> {
		match self.value(name)? {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn int(&self, name: &str) -> Option<i64> {
		match self.value(name)? {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn str(&self, name: &str) -> Option<&str> {
		match self.value(name)? {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn connection(&self, name: &str) -> Option<&ConnectionDescriptor> {
		match self.value(name)? {
			Value::Connection(desc) => Some(desc),
			_ => None,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &ResolvedField> {
		self.fields.iter()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// `(name, value)` pairs for exporting into a child environment.
	///
	/// Includes secrets and passwords in plain text.
	pub fn to_env_pairs(&self) -> Vec<(String, String)> {
		self.fields
			.iter()
			.map(|f| (f.name.clone(), f.export_value()))
			.collect()
	}
}
