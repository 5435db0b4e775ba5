//! Raw key/value sources.
//!
//! This module handles:
//! - Reading declared keys from the environment
//! - Parsing the `KEY=VALUE` override file

pub mod env;
pub mod override_file;
pub mod types;

pub use env::{EnvSource, MapEnv, StdEnv};
pub use override_file::{load_override_file, parse_override_str};
pub use types::{OverrideFile, RawEntry, Source};

use crate::error::Result;
use crate::schema::Schema;
use std::collections::HashSet;
use tracing::debug;

/// Collect raw entries for `schema`: environment first, then the override file.
///
/// Only environment variables named by the schema are read. Every entry of
/// the override file is returned, including keys the schema does not declare.
pub fn load_entries<E: EnvSource + ?Sized>(
	schema: &Schema,
	env: &E,
	override_file: Option<&OverrideFile>,
) -> Result<Vec<RawEntry>> {
	let mut entries = Vec::new();
	for spec in schema.fields() {
		if let Some(value) = env.get(&spec.name)? {
			entries.push(RawEntry {
				key: spec.name.clone(),
				value,
				source: Source::Environment,
			});
		}
	}
	let from_env = entries.len();

	if let Some(file) = override_file {
		entries.extend(load_override_file(file)?);
	}

	debug!(
		environment = from_env,
		override_file = entries.len() - from_env,
		"collected raw entries"
	);
	Ok(entries)
}

/// Keys present in `entries` that `schema` does not declare.
pub fn undeclared_keys<'a>(schema: &Schema, entries: &'a [RawEntry]) -> Vec<&'a str> {
	let mut seen = HashSet::new();
	entries
		.iter()
		.map(|e| e.key.as_str())
		.filter(|key| !schema.contains(key) && seen.insert(*key))
		.collect()
}
