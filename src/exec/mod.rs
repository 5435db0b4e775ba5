//! Launching the application with resolved configuration.
//!
//! This module handles:
//! - Executing the application with the resolved values in its environment
//! - Exit code propagation

use crate::error::{ConfigError, Result};
use crate::schema::ResolvedConfig;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Execute a command with the resolved configuration exported.
///
/// This function:
/// - Passes stdin, stdout, stderr through to the child process
/// - Adds every resolved field to the child's environment, overriding
///   inherited variables of the same name
/// - Returns the exit status of the child process
pub fn execute_with_config(
	binary: &Path,
	args: &[String],
	cwd: &Path,
	config: &ResolvedConfig,
) -> Result<ExitStatus> {
	let mut cmd = Command::new(binary);
	cmd.args(args)
		.current_dir(cwd)
		.envs(config.to_env_pairs())
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	debug!(binary = %binary.display(), exported = config.len(), "launching command");

	let status = cmd.status().map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			ConfigError::CommandNotFound {
				command: binary.to_string_lossy().to_string(),
			}
		} else {
			ConfigError::CommandFailed {
				command: binary.to_string_lossy().to_string(),
				source,
			}
		}
	})?;

	Ok(status)
}

/// Resolve a command name to its full path.
///
/// If the command is already an absolute path, returns it as-is.
/// Otherwise, searches PATH for the command.
pub fn resolve_command(command: &str) -> Option<PathBuf> {
	let path = Path::new(command);

	if path.is_absolute() {
		return path.exists().then(|| path.to_path_buf());
	}

	let path_var = std::env::var_os("PATH")?;
	std::env::split_paths(&path_var)
		.map(|dir| dir.join(command))
		.find(|candidate| candidate.is_file())
}
