//! Launching tools and reading their output.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use indexmap::IndexMap;
use tla_diagnostics::DiagnosticCollection;
use tla_tool_output::obligation::ObligationRecord;
use tla_tool_output::{AnalyzerOutput, AnalyzerParser, OutputParser, OutputSink, StreamError, Tee, TranspilerParser, read_all};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::config::{Tool, ToolCommand, ToolsConfig};
use crate::error::{Result, ToolError};

/// Parsed output of one tool run together with how the process exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRun<T> {
	pub output: T,
	pub status: ExitStatus,
}

/// Parse results that carry a diagnostic collection.
pub trait ReportsDiagnostics {
	fn diagnostics(&self) -> &DiagnosticCollection;
}

impl ReportsDiagnostics for DiagnosticCollection {
	fn diagnostics(&self) -> &DiagnosticCollection {
		self
	}
}

impl ReportsDiagnostics for AnalyzerOutput {
	fn diagnostics(&self) -> &DiagnosticCollection {
		&self.diagnostics
	}
}

impl<T: ReportsDiagnostics> ToolRun<T> {
	/// True when the tool exited unsuccessfully without reporting anything.
	///
	/// The run still counts as parsed; callers decide whether to surface it.
	pub fn failed_silently(&self) -> bool {
		!self.status.success() && self.output.diagnostics().is_empty()
	}
}

/// Combined result of transpiling and analyzing one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
	/// Transpiler diagnostics followed by the analyzer's.
	pub diagnostics: DiagnosticCollection,
	/// Module files the analyzer parsed.
	pub module_paths: IndexMap<String, PathBuf>,
	/// Proof obligations, when the analyzer ran in extended mode.
	pub obligations: Vec<ObligationRecord>,
	pub transpiler_status: ExitStatus,
	pub analyzer_status: ExitStatus,
}

impl ModuleReport {
	/// True when either tool exited unsuccessfully and nothing was reported.
	pub fn failed_silently(&self) -> bool {
		self.diagnostics.is_empty() && !(self.transpiler_status.success() && self.analyzer_status.success())
	}
}

fn ensure_tla(path: &Path) -> Result<()> {
	if path.extension().is_some_and(|ext| ext == "tla") {
		Ok(())
	} else {
		Err(ToolError::NotTlaFile { path: path.to_path_buf() })
	}
}

/// Runs `command`, feeding its stdout to `parser` and every raw line to `sink`.
///
/// Stderr lines go to the sink only. The process is killed as soon as
/// reading its stdout fails, which also ends the stderr side.
pub async fn run_tool<P, S>(command: &ToolCommand, parser: P, sink: S) -> Result<ToolRun<P::Output>>
where
	P: OutputParser,
	S: OutputSink,
{
	let tool = command.tool.name();
	let program = command.program.to_string_lossy().into_owned();
	tracing::debug!(tool, program = %program, args = ?command.args, "Spawning tool");

	let mut cmd = Command::new(&command.program);
	cmd.args(&command.args)
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.kill_on_drop(true);

	let mut child = cmd.spawn().map_err(|e| ToolError::Spawn {
		program: program.clone(),
		reason: e.to_string(),
	})?;
	let stdout = child.stdout.take().ok_or(ToolError::MissingStdout { tool })?;
	let stderr = child.stderr.take();

	let output = read_streams(stdout, stderr, parser, tool, &sink, || {
		if let Err(error) = child.start_kill() {
			tracing::debug!(tool, %error, "Failed to kill tool");
		}
	})
	.await?;

	let status = child.wait().await.map_err(|error| ToolError::Wait { tool, error })?;
	if status.success() {
		tracing::debug!(tool, %status, "Tool finished");
	} else {
		tracing::warn!(tool, %status, "Tool exited unsuccessfully");
	}
	Ok(ToolRun { output, status })
}

/// Parses `stdout` while forwarding `stderr`, calling `on_failure` as soon
/// as the stdout side fails so the stderr side can end.
async fn read_streams<O, E, P, S>(
	stdout: O,
	stderr: Option<E>,
	parser: P,
	tool: &str,
	sink: &S,
	on_failure: impl FnOnce(),
) -> std::result::Result<P::Output, StreamError>
where
	O: AsyncRead + Unpin,
	E: AsyncRead + Unpin,
	P: OutputParser,
	S: OutputSink,
{
	let parsed = async {
		let result = read_all(stdout, Tee::new(parser, sink)).await;
		if result.is_err() {
			on_failure();
		}
		result
	};
	let forwarded = async {
		if let Some(stderr) = stderr {
			forward_lines(stderr, tool, sink).await;
		}
	};
	let (output, ()) = tokio::join!(parsed, forwarded);
	output
}

async fn forward_lines<R: AsyncRead + Unpin, S: OutputSink>(reader: R, tool: &str, sink: &S) {
	let mut lines = BufReader::new(reader).lines();
	loop {
		match lines.next_line().await {
			Ok(Some(line)) => sink.line(tool, &line),
			Ok(None) => break,
			Err(error) => {
				tracing::debug!(tool, %error, "Stopped reading tool stderr");
				break;
			}
		}
	}
}

/// Transpiles the PlusCal algorithm in `module`, rewriting the file in place.
pub async fn transpile(config: &ToolsConfig, module: &Path, sink: impl OutputSink) -> Result<ToolRun<DiagnosticCollection>> {
	ensure_tla(module)?;
	let command = config.command(Tool::Transpiler, module)?;
	run_tool(&command, TranspilerParser::new(module), sink).await
}

/// Runs the analyzer on `module`.
pub async fn analyze(config: &ToolsConfig, module: &Path, sink: impl OutputSink) -> Result<ToolRun<AnalyzerOutput>> {
	ensure_tla(module)?;
	let command = config.command(Tool::Analyzer, module)?;
	let parser = if config.analyzer.extended {
		AnalyzerParser::extended()
	} else {
		AnalyzerParser::new()
	};
	run_tool(&command, parser, sink).await
}

/// Transpiles `module`, then analyzes the result.
///
/// The analyzer runs even when the transpiler reported errors.
pub async fn parse_module<S: OutputSink>(config: &ToolsConfig, module: &Path, sink: &S) -> Result<ModuleReport> {
	let transpiled = transpile(config, module, sink).await?;
	let analyzed = analyze(config, module, sink).await?;

	let AnalyzerOutput {
		diagnostics,
		module_paths,
		obligations,
	} = analyzed.output;
	let mut merged = transpiled.output;
	merged.add_all(diagnostics);
	tracing::debug!(path = %module.display(), diagnostics = merged.len(), "Parsed module");

	Ok(ModuleReport {
		diagnostics: merged,
		module_paths,
		obligations,
		transpiler_status: transpiled.status,
		analyzer_status: analyzed.status,
	})
}

#[cfg(test)]
mod tests;
