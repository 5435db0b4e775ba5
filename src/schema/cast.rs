use crate::decode::decode_connection;
use crate::error::{ConfigError, Result};
use crate::schema::resolved::Value;
use crate::schema::types::{FieldSpec, FieldType};

/// Literals accepted as `true`, compared case-insensitively.
pub const TRUTHY: &[&str] = &["true", "1", "yes", "on"];

/// Literals accepted as `false`, compared case-insensitively.
pub const FALSY: &[&str] = &["false", "0", "no", "off"];

const REDACTED_INPUT: &str = "<redacted>";

/// Cast a boolean literal. Anything outside the fixed sets is rejected.
pub fn cast_bool(raw: &str) -> Option<bool> {
	if TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(raw)) {
		Some(true)
	} else if FALSY.iter().any(|f| f.eq_ignore_ascii_case(raw)) {
		Some(false)
	} else {
		None
	}
}

/// Strict base-10 integer: optional sign then digits, nothing else.
pub fn cast_int(raw: &str) -> Option<i64> {
	let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	raw.parse().ok()
}

/// Cast a raw value according to its field spec.
pub fn cast_value(spec: &FieldSpec, raw: &str) -> Result<Value> {
	match spec.field_type {
		FieldType::Boolean => cast_bool(raw)
			.map(Value::Bool)
			.ok_or_else(|| cast_error(spec, "boolean (true/false, 1/0, yes/no, on/off)", raw)),
		FieldType::Integer => cast_int(raw)
			.map(Value::Int)
			.ok_or_else(|| cast_error(spec, "base-10 integer", raw)),
		FieldType::String => {
			if spec.non_empty && raw.is_empty() {
				Err(cast_error(spec, "non-empty string", raw))
			} else {
				Ok(Value::Str(raw.to_string()))
			}
		}
		FieldType::Url => decode_connection(raw)
			.map(Value::Connection)
			.map_err(|source| ConfigError::Decode {
				field: spec.name.clone(),
				source,
			}),
	}
}

fn cast_error(spec: &FieldSpec, expected: &'static str, raw: &str) -> ConfigError {
	let value = if spec.secret { REDACTED_INPUT } else { raw };
	ConfigError::Cast {
		field: spec.name.clone(),
		expected,
		value: value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cast_bool_literals() {
		for literal in ["true", "True", "TRUE", "1", "yes", "on", "ON"] {
			assert_eq!(cast_bool(literal), Some(true), "{literal}");
		}
		for literal in ["false", "False", "0", "no", "off", "Off"] {
			assert_eq!(cast_bool(literal), Some(false), "{literal}");
		}
		for literal in ["", "t", "y", "2", "enabled", " true", "true "] {
			assert_eq!(cast_bool(literal), None, "{literal:?}");
		}
	}

	#[test]
	fn test_cast_int_strict() {
		assert_eq!(cast_int("8000"), Some(8000));
		assert_eq!(cast_int("-42"), Some(-42));
		assert_eq!(cast_int("+7"), Some(7));
		assert_eq!(cast_int("0"), Some(0));

		assert_eq!(cast_int(""), None);
		assert_eq!(cast_int("-"), None);
		assert_eq!(cast_int("+"), None);
		assert_eq!(cast_int("12a"), None);
		assert_eq!(cast_int(" 12"), None);
		assert_eq!(cast_int("1_000"), None);
		assert_eq!(cast_int("0x10"), None);
		assert_eq!(cast_int("+-1"), None);
		assert_eq!(cast_int("99999999999999999999"), None);
	}

	#[test]
	fn test_cast_value_error_names_field() {
		let spec = FieldSpec::new("WEB_CONCURRENCY", FieldType::Integer);

		match cast_value(&spec, "four").unwrap_err() {
			ConfigError::Cast {
				field,
				expected,
				value,
			} => {
				assert_eq!(field, "WEB_CONCURRENCY");
				assert_eq!(expected, "base-10 integer");
				assert_eq!(value, "four");
			}
			other => panic!("Expected Cast error, got {other:?}"),
		}
	}

	#[test]
	fn test_cast_value_redacts_secret_input() {
		let spec = FieldSpec::new("SECRET_KEY", FieldType::String)
			.non_empty()
			.secret();
		let err = cast_value(&spec, "").unwrap_err();
		assert!(matches!(err, ConfigError::Cast { ref value, .. } if value == "<redacted>"));

		let spec = FieldSpec::new("PIN", FieldType::Integer).secret();
		let err = cast_value(&spec, "12x4").unwrap_err();
		assert!(!err.to_string().contains("12x4"));
	}

	#[test]
	fn test_cast_value_string() {
		let spec = FieldSpec::new("STATIC_ROOT", FieldType::String);
		assert_eq!(cast_value(&spec, "").unwrap(), Value::Str(String::new()));
		assert_eq!(
			cast_value(&spec, " padded ").unwrap(),
			Value::Str(" padded ".to_string())
		);

		let spec = spec.non_empty();
		assert!(cast_value(&spec, "").is_err());
	}

	#[test]
	fn test_cast_value_url_wraps_decode_error() {
		let spec = FieldSpec::new("DATABASE_URL", FieldType::Url);

		match cast_value(&spec, "postgres://localhost").unwrap_err() {
			ConfigError::Decode { field, .. } => assert_eq!(field, "DATABASE_URL"),
			other => panic!("Expected Decode error, got {other:?}"),
		}
	}
}
