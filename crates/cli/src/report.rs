//! Rendering of parse results.

use std::io::{self, Write};

use serde::Serialize;
use tla_diagnostics::{DiagnosticCollection, Severity};
use tla_tool_output::AnalyzerOutput;
use tla_tool_output::obligation::{ObligationRecord, ProofFinish, ProofFinishStatus};
use tla_tools::{ModuleReport, ToolRun};

/// What a command found, ready to print.
#[derive(Debug, Default, Serialize)]
pub struct Report {
	pub diagnostics: DiagnosticCollection,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub obligations: Vec<ObligationRecord>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub proof: Option<ProofFinish>,
	/// Tools that exited unsuccessfully without reporting anything.
	pub silent_failures: Vec<String>,
}

impl Report {
	pub fn from_collection(diagnostics: DiagnosticCollection) -> Self {
		Self {
			diagnostics,
			..Self::default()
		}
	}

	pub fn from_analysis(output: AnalyzerOutput, extended: bool) -> Self {
		let proof = extended.then(|| output.proof_finish());
		Self {
			diagnostics: output.diagnostics,
			obligations: output.obligations,
			proof,
			silent_failures: Vec::new(),
		}
	}

	pub fn transpiled(run: ToolRun<DiagnosticCollection>) -> Self {
		let silent = run.failed_silently();
		Self::from_collection(run.output).with_silent_failure(silent.then_some(("pluscal", run.status)))
	}

	pub fn analyzed(run: ToolRun<AnalyzerOutput>, extended: bool) -> Self {
		let silent = run.failed_silently();
		Self::from_analysis(run.output, extended).with_silent_failure(silent.then_some(("sany", run.status)))
	}

	pub fn module(report: ModuleReport, extended: bool) -> Self {
		let silent = report.failed_silently();
		let failed_tool = if !report.transpiler_status.success() {
			("pluscal", report.transpiler_status)
		} else {
			("sany", report.analyzer_status)
		};
		let analysis = AnalyzerOutput {
			diagnostics: report.diagnostics,
			module_paths: report.module_paths,
			obligations: report.obligations,
		};
		Self::from_analysis(analysis, extended).with_silent_failure(silent.then_some(failed_tool))
	}

	fn with_silent_failure(mut self, failure: Option<(&str, std::process::ExitStatus)>) -> Self {
		if let Some((tool, status)) = failure {
			tracing::warn!(tool, %status, "Tool failed without reporting problems");
			self.silent_failures.push(format!("{tool} exited with {status} without reporting problems"));
		}
		self
	}

	/// Process exit code: 1 when errors were found or a tool failed silently.
	pub fn exit_code(&self) -> u8 {
		if self.diagnostics.has_errors() || !self.silent_failures.is_empty() {
			1
		} else {
			0
		}
	}

	/// Writes `path:line:col: severity: message` lines, 1-based.
	pub fn write_human(&self, out: &mut impl Write) -> io::Result<()> {
		for (path, diagnostics) in self.diagnostics.iter() {
			for diagnostic in diagnostics {
				let mut lines = diagnostic.message.lines();
				let start = diagnostic.range.start;
				writeln!(
					out,
					"{}:{}:{}: {}: {}",
					path.display(),
					start.line + 1,
					start.column + 1,
					diagnostic.severity,
					lines.next().unwrap_or_default()
				)?;
				for line in lines {
					writeln!(out, "    {line}")?;
				}
			}
		}

		for record in &self.obligations {
			let state = &record.obligation;
			writeln!(
				out,
				"obligation {} at {}:{}: {} ({} of {} proved, {} failed)",
				state.role,
				state.range.start.line + 1,
				state.range.start.column + 1,
				state.status,
				record.counts.proved,
				record.counts.total(),
				record.counts.failed
			)?;
		}
		if let Some(proof) = &self.proof {
			let status = match proof.status {
				ProofFinishStatus::Success => "success",
				ProofFinishStatus::Failure => "failure",
				ProofFinishStatus::Skipped => "skipped",
			};
			writeln!(out, "proof: {status}: {}", proof.reason)?;
		}

		let errors = self.diagnostics.count(Severity::Error);
		let warnings = self.diagnostics.count(Severity::Warning);
		if errors + warnings > 0 {
			writeln!(out, "{errors} error(s), {warnings} warning(s)")?;
		}
		Ok(())
	}

	pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
		serde_json::to_writer_pretty(&mut *out, self)?;
		writeln!(out)
	}

	/// Writes the report to `out` and silent-failure notes to `err`.
	pub fn emit(&self, json: bool, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
		if json {
			self.write_json(out)?;
		} else {
			self.write_human(out)?;
		}
		for failure in &self.silent_failures {
			writeln!(err, "tla: {failure}")?;
		}
		Ok(())
	}
}
