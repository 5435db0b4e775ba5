//! envres - typed configuration resolver.
//!
//! This library provides the core functionality for envres, including:
//! - Reading declared keys from the environment and a `KEY=VALUE` override file
//! - Casting raw values to booleans, integers and strings per a declared schema
//! - Decoding database connection URLs into their parts
//! - Launching an application with the resolved values exported
//!
//! Resolution happens once, at startup, and produces an immutable
//! [`ResolvedConfig`] that can be shared freely across threads.
//!
//! # Example
//!
//! ```no_run
//! use envres::schema::{FieldSpec, FieldType, Precedence, Schema, resolve_config};
//! use envres::source::{OverrideFile, StdEnv};
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::new("DEBUG", FieldType::Boolean).with_default("false"),
//!     FieldSpec::new("DATABASE_URL", FieldType::Url).required().secret(),
//! ])
//! .unwrap();
//!
//! let config = resolve_config(
//!     &schema,
//!     &StdEnv,
//!     Some(&OverrideFile::optional(".env")),
//!     Precedence::default(),
//! )
//! .unwrap();
//!
//! let db = config.connection("DATABASE_URL").unwrap();
//! println!("connecting to {} on {}:{:?}", db.name, db.host, db.port);
//! ```

pub mod decode;
pub mod error;
pub mod exec;
pub mod schema;
pub mod source;

pub use decode::{ConnectionDescriptor, DecodeError, decode_connection};
pub use error::{ConfigError, Result};
pub use schema::{FieldSpec, FieldType, Precedence, ResolvedConfig, Schema, Value};
