//! Error types for launching tools.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tla_tool_output::StreamError;

/// Errors from reading the tools configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("failed to read {}: {error}", path.display())]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: io::Error,
	},

	/// Error parsing TOML syntax or an unexpected key.
	#[error("failed to parse tools config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Errors from launching a tool or reading its output.
#[derive(Debug, Error)]
pub enum ToolError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The file to process is not a `.tla` module.
	#[error("{} is not a TLA+ module", path.display())]
	NotTlaFile { path: PathBuf },

	/// A Java tool was requested but `tla2tools` is not set.
	#[error("tla2tools.jar location is not configured")]
	MissingJar,

	/// A `command` override is an empty list.
	#[error("empty command configured for {tool}")]
	EmptyCommand { tool: &'static str },

	/// The process could not be started.
	#[error("failed to spawn {program}: {reason}")]
	Spawn { program: String, reason: String },

	#[error("{tool} stdout was not captured")]
	MissingStdout { tool: &'static str },

	/// Reading the tool's output failed; partial results are discarded.
	#[error(transparent)]
	Stream(#[from] StreamError),

	#[error("failed to wait for {tool}: {error}")]
	Wait {
		tool: &'static str,
		#[source]
		error: io::Error,
	},
}

/// Result type for tool operations.
pub type Result<T, E = ToolError> = std::result::Result<T, E>;
