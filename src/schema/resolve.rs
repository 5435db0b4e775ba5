use crate::error::{ConfigError, Result};
use crate::schema::cast::cast_value;
use crate::schema::resolved::{Provenance, ResolvedConfig, ResolvedField};
use crate::schema::types::{Precedence, Schema};
use crate::source::{EnvSource, OverrideFile, RawEntry, load_entries};
use tracing::debug;

/// Resolve every field of `schema` from `entries`.
///
/// For each field the highest-precedence entry wins; within one source the
/// last entry for a key wins. Without an entry the default is cast instead.
/// Any failure aborts the whole pass, so a partial config is never returned.
pub fn resolve(
	schema: &Schema,
	entries: &[RawEntry],
	precedence: Precedence,
) -> Result<ResolvedConfig> {
	let mut fields = Vec::with_capacity(schema.len());

	for spec in schema.fields() {
		let found = precedence.order().into_iter().find_map(|source| {
			entries
				.iter()
				.rev()
				.find(|e| e.source == source && e.key == spec.name)
		});

		let (raw, provenance) = match (found, &spec.default) {
			(Some(entry), _) => (entry.value.as_str(), Provenance::from(entry.source)),
			(None, Some(default)) => (default.as_str(), Provenance::Default),
			(None, None) if spec.required => {
				return Err(ConfigError::MissingRequiredField {
					field: spec.name.clone(),
				});
			}
			(None, None) => {
				debug!(field = %spec.name, "optional field not set");
				continue;
			}
		};

		let value = cast_value(spec, raw)?;
		debug!(field = %spec.name, %provenance, "resolved field");

		fields.push(ResolvedField {
			name: spec.name.clone(),
			value,
			provenance,
			secret: spec.secret,
			raw: raw.to_string(),
		});
	}

	Ok(ResolvedConfig::new(fields))
}

/// Load sources and resolve in one step.
pub fn resolve_config<E: EnvSource + ?Sized>(
	schema: &Schema,
	env: &E,
	override_file: Option<&OverrideFile>,
	precedence: Precedence,
) -> Result<ResolvedConfig> {
	let entries = load_entries(schema, env, override_file)?;
	resolve(schema, &entries, precedence)
}
