//! Tool launch configuration.
//!
//! ```toml
//! java_home = "/usr/lib/jvm/java-17"
//! tla2tools = "/opt/tla/tla2tools.jar"
//! java_options = ["-Xss4m"]
//!
//! [transpiler]
//! options = ["-nocfg"]
//!
//! [analyzer]
//! extended = true
//! ```
//!
//! Either tool can bypass Java entirely with a `command` list, whose first
//! element is the program to run.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, ToolError};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TLA_TOOLS_CONFIG";

/// The external tools this crate launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
	/// PlusCal to TLA+ transpiler.
	Transpiler,
	/// SANY syntax and semantic analyzer.
	Analyzer,
}

impl Tool {
	/// Short name used in logs and sink tags.
	pub fn name(self) -> &'static str {
		match self {
			Self::Transpiler => "pluscal",
			Self::Analyzer => "sany",
		}
	}

	fn main_class(self) -> &'static str {
		match self {
			Self::Transpiler => "pcal.trans",
			Self::Analyzer => "tla2sany.SANY",
		}
	}
}

/// Transpiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranspilerSettings {
	/// Options passed before the module path.
	pub options: Vec<String>,
	/// Replaces the Java invocation when set.
	pub command: Option<Vec<String>>,
}

impl Default for TranspilerSettings {
	fn default() -> Self {
		Self {
			options: vec!["-nocfg".into()],
			command: None,
		}
	}
}

/// Analyzer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerSettings {
	/// Options passed before the module path.
	pub options: Vec<String>,
	/// Collect proof obligation records as well as diagnostics.
	pub extended: bool,
	/// Replaces the Java invocation when set.
	pub command: Option<Vec<String>>,
}

/// How to launch the tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
	/// Java program, used when `java_home` is unset.
	pub java: PathBuf,
	/// Java installation whose `bin/java` is used.
	pub java_home: Option<PathBuf>,
	/// Path to `tla2tools.jar`.
	pub tla2tools: Option<PathBuf>,
	/// JVM options.
	pub java_options: Vec<String>,
	pub transpiler: TranspilerSettings,
	pub analyzer: AnalyzerSettings,
}

impl Default for ToolsConfig {
	fn default() -> Self {
		Self {
			java: PathBuf::from("java"),
			java_home: None,
			tla2tools: None,
			java_options: Vec::new(),
			transpiler: TranspilerSettings::default(),
			analyzer: AnalyzerSettings::default(),
		}
	}
}

/// A fully resolved program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
	pub tool: Tool,
	pub program: OsString,
	pub args: Vec<OsString>,
}

impl ToolsConfig {
	/// Parses a TOML document.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses the config file at `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml(&text)?;
		tracing::debug!(path = %path.display(), "Loaded tools config");
		Ok(config)
	}

	/// Finds and loads the config.
	///
	/// An explicit path wins, then [`CONFIG_ENV`], then `tla/tools.toml` in
	/// the user's config directory. Explicit and environment paths must
	/// exist; when the default file is absent the built-in defaults apply.
	pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
		let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
		let fallback = dirs::config_dir().map(|dir| dir.join("tla").join("tools.toml"));
		Self::discover_from(explicit, env, fallback)
	}

	pub(crate) fn discover_from(explicit: Option<&Path>, env: Option<PathBuf>, fallback: Option<PathBuf>) -> Result<Self, ConfigError> {
		if let Some(path) = explicit.map(Path::to_path_buf).or(env) {
			return Self::load(&path);
		}
		match fallback {
			Some(path) if path.is_file() => Self::load(&path),
			_ => {
				tracing::debug!("No tools config found, using defaults");
				Ok(Self::default())
			}
		}
	}

	/// The Java program to run.
	pub fn java_program(&self) -> PathBuf {
		match &self.java_home {
			Some(home) => home.join("bin").join("java"),
			None => self.java.clone(),
		}
	}

	/// Builds the invocation of `tool` on `module`.
	pub fn command(&self, tool: Tool, module: &Path) -> Result<ToolCommand, ToolError> {
		let (options, custom) = match tool {
			Tool::Transpiler => (&self.transpiler.options, &self.transpiler.command),
			Tool::Analyzer => (&self.analyzer.options, &self.analyzer.command),
		};

		let (program, mut args): (OsString, Vec<OsString>) = match custom {
			Some(custom) => {
				let (program, rest) = custom.split_first().ok_or(ToolError::EmptyCommand { tool: tool.name() })?;
				(program.into(), rest.iter().map(OsString::from).collect())
			}
			None => {
				let jar = self.tla2tools.as_ref().ok_or(ToolError::MissingJar)?;
				let mut args: Vec<OsString> = self.java_options.iter().map(OsString::from).collect();
				args.extend(["-cp".into(), jar.into(), tool.main_class().into()]);
				(self.java_program().into(), args)
			}
		};
		args.extend(options.iter().map(OsString::from));
		args.push(module.into());
		Ok(ToolCommand { tool, program, args })
	}
}
