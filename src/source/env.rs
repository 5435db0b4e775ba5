use crate::error::{ConfigError, Result};
use std::collections::HashMap;

/// Abstraction over the process environment.
///
/// Lets resolution run against a fixed map in tests without touching
/// the real environment.
pub trait EnvSource {
	/// Get the value of an environment variable by exact name.
	///
	/// A variable that is set but unreadable is an error, never `None`.
	fn get(&self, name: &str) -> Result<Option<String>>;
}

/// Environment source that reads from the actual process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
	fn get(&self, name: &str) -> Result<Option<String>> {
		match std::env::var(name) {
			Ok(value) => Ok(Some(value)),
			Err(std::env::VarError::NotPresent) => Ok(None),
			Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::EnvNotUnicode {
				name: name.to_string(),
			}),
		}
	}
}

/// Environment source backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
	vars: HashMap<String, String>,
}

impl MapEnv {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a map environment from key-value pairs.
	pub fn from_pairs<I, K, V>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		MapEnv {
			vars: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.vars.insert(name.into(), value.into());
		self
	}
}

impl EnvSource for MapEnv {
	fn get(&self, name: &str) -> Result<Option<String>> {
		Ok(self.vars.get(name).cloned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	fn test_map_env_is_case_sensitive() {
		let env = MapEnv::new().with("DEBUG", "1");

		assert_eq!(env.get("DEBUG").unwrap().as_deref(), Some("1"));
		assert_eq!(env.get("debug").unwrap(), None);
	}

	#[test]
	#[serial]
	fn test_std_env_reads_process_environment() {
		// SAFETY: serialized with every other test that touches the environment
		unsafe {
			std::env::set_var("ENVRES_TEST_STD_ENV", "value");
			std::env::remove_var("ENVRES_TEST_STD_ENV_MISSING");
		}

		assert_eq!(
			StdEnv.get("ENVRES_TEST_STD_ENV").unwrap().as_deref(),
			Some("value")
		);
		assert_eq!(StdEnv.get("ENVRES_TEST_STD_ENV_MISSING").unwrap(), None);

		unsafe {
			std::env::remove_var("ENVRES_TEST_STD_ENV");
		}
	}
}
