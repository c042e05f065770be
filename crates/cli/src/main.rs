//! `tla` command-line tool.
//!
//! Runs the PlusCal transpiler and the SANY analyzer on a module, or parses
//! their saved output from stdin, and prints the resulting diagnostics.

mod cli;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tla_tool_output::{AnalyzerParser, StreamError, TracingSink, TranspilerParser, read_all};
use tla_tools::{ConfigError, ToolError, ToolsConfig, analyze, parse_module, transpile};

use crate::cli::{Cli, Command, ToolKind};
use crate::report::Report;

/// Exit code for a tool or stream failure.
const FAILURE_EXIT: u8 = 2;

#[derive(Debug, Error)]
enum CliError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Tool(#[from] ToolError),
	#[error(transparent)]
	Stream(#[from] StreamError),
	#[error("failed to write output: {0}")]
	Output(#[from] io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match run(cli).await {
		Ok(code) => ExitCode::from(code),
		Err(err) => {
			tracing::debug!(error = ?err, "Command failed");
			eprintln!("tla: {err}");
			ExitCode::from(FAILURE_EXIT)
		}
	}
}

async fn run(cli: Cli) -> Result<u8, CliError> {
	let sink = TracingSink;
	let report = match cli.command {
		Command::Parse { file, extended } => {
			let config = load_config(cli.config, extended)?;
			Report::module(parse_module(&config, &file, &sink).await?, config.analyzer.extended)
		}
		Command::Transpile { file } => {
			let config = load_config(cli.config, false)?;
			Report::transpiled(transpile(&config, &file, sink).await?)
		}
		Command::Analyze { file, extended } => {
			let config = load_config(cli.config, extended)?;
			Report::analyzed(analyze(&config, &file, sink).await?, config.analyzer.extended)
		}
		Command::Read { tool, source, extended } => {
			let stdin = tokio::io::stdin();
			match tool {
				ToolKind::Transpiler => {
					let source = source.unwrap_or_else(|| PathBuf::from("-"));
					Report::from_collection(read_all(stdin, TranspilerParser::new(source)).await?)
				}
				ToolKind::Analyzer if extended => Report::from_analysis(read_all(stdin, AnalyzerParser::extended()).await?, true),
				ToolKind::Analyzer => Report::from_analysis(read_all(stdin, AnalyzerParser::new()).await?, false),
			}
		}
	};

	let mut out = io::stdout().lock();
	report.emit(cli.json, &mut out, &mut io::stderr().lock())?;
	out.flush()?;
	Ok(report.exit_code())
}

fn load_config(path: Option<PathBuf>, extended: bool) -> Result<ToolsConfig, ConfigError> {
	let mut config = ToolsConfig::discover(path.as_deref())?;
	config.analyzer.extended |= extended;
	Ok(config)
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("tla=debug,tla_tools=debug,tla_tool_output=debug,warn")
			} else {
				EnvFilter::new("warn")
			}
		})
	};

	// TLA_LOG_DIR sends logs to a per-process file instead of stderr
	if let Some(log_dir) = std::env::var_os("TLA_LOG_DIR").map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("tla.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false).with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::debug!(path = %log_path.display(), "Tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt().with_env_filter(filter()).with_writer(io::stderr).init();
}
