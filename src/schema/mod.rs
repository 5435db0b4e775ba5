//! Schema declaration, casting and resolution.
//!
//! This module handles:
//! - Field specs and schema validation
//! - Casting raw strings to typed values
//! - Resolving sources into an immutable config
//! - TOML schema file parsing and discovery

pub mod cast;
pub mod file;
pub mod resolve;
pub mod resolved;
pub mod template;
pub mod types;

pub use cast::{cast_bool, cast_int, cast_value};
pub use file::{
	SCHEMA_FILE_NAME, SchemaFile, discover_schema_file, load_schema_file, parse_schema_file,
	parse_schema_str, user_schema_path,
};
pub use resolve::{resolve, resolve_config};
pub use resolved::{Provenance, ResolvedConfig, ResolvedField, Value};
pub use template::init_template;
pub use types::{FieldSpec, FieldType, Precedence, Schema, is_valid_field_name};
