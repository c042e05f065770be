use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Runs the TLA+ transpiler and analyzer and reports their diagnostics.
#[derive(Parser, Debug)]
#[command(name = "tla", version)]
pub struct Cli {
	/// Tools config file
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Print results as JSON
	#[arg(long, global = true)]
	pub json: bool,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Transpile the PlusCal algorithm, then analyze the module
	Parse {
		file: PathBuf,
		/// Also collect proof obligations
		#[arg(long)]
		extended: bool,
	},
	/// Transpile the PlusCal algorithm in a module
	Transpile { file: PathBuf },
	/// Check a module's syntax and semantics
	Analyze {
		file: PathBuf,
		/// Also collect proof obligations
		#[arg(long)]
		extended: bool,
	},
	/// Parse saved tool output from stdin
	Read {
		#[arg(value_enum)]
		tool: ToolKind,
		/// Module the output was produced for
		#[arg(long, value_name = "FILE")]
		source: Option<PathBuf>,
		/// Also collect proof obligations
		#[arg(long)]
		extended: bool,
	},
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
	Transpiler,
	Analyzer,
}
