//! Parser for the syntax and semantic analyzer's output.
//!
//! The analyzer's output is split into sections by banners. Parse and
//! semantic error sections contain location headers followed by message
//! bodies; the warning section uses the same layout with warning severity.
//!
//! In extended mode the obligation section is parsed too:
//!
//! ```text
//! Obligations:
//! role=main range=4:1-4:20 status=failed
//!     x \in Nat => x + 1 > x
//! prover=Zenon meth=auto status=failed reason=timeout
//! proved=0 failed=1 omitted=0 missing=0 pending=0 progress=0
//! ```
//!
//! A status header opens an obligation, prover lines attach results to it,
//! and a count line closes it. Obligations are reported separately from the
//! diagnostics.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tla_diagnostics::{DiagnosticCollection, ParseLocation, Range, Severity};

use crate::line::{HeaderTarget, Line, LocationHeader, STDIN_PATH, Section, Status, classify};
use crate::obligation::{
	CountByStepStatus, Location, ObligationRecord, ProofFinish, ProofFinishStatus, ProofObligationResult, ProofObligationState,
	ProofStepDetails,
};
use crate::pending::PendingDiagnostic;
use crate::reader::OutputParser;
use crate::transpiler::sibling_module;

/// States of the analyzer parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzerState {
	/// Outside any section.
	#[default]
	Idle,
	/// Inside the parse error section.
	InParseErrorSection,
	/// Inside the semantic error section.
	InSemanticErrorSection,
	/// Inside the semantic warning section.
	InSemanticWarningSection,
	/// Inside the obligation status section.
	InObligationSection,
}

impl AnalyzerState {
	fn severity(self, header: &LocationHeader) -> Severity {
		match self {
			Self::InSemanticWarningSection => Severity::Warning,
			Self::InParseErrorSection | Self::InSemanticErrorSection => Severity::Error,
			Self::Idle | Self::InObligationSection => header.severity.unwrap_or(Severity::Error),
		}
	}
}

/// Everything extracted from one analyzer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyzerOutput {
	/// Parse and semantic diagnostics.
	pub diagnostics: DiagnosticCollection,
	/// Files announced by `Parsing file` banners, keyed by module name.
	pub module_paths: IndexMap<String, PathBuf>,
	/// Closed proof obligations, in report order. Empty unless extended.
	pub obligations: Vec<ObligationRecord>,
}

impl AnalyzerOutput {
	/// Summarizes every obligation as one step located in `path`.
	///
	/// Returns `None` when no obligation was reported.
	pub fn proof_step(&self, path: impl Into<PathBuf>) -> Option<ProofStepDetails> {
		let first = self.obligations.first()?;
		let mut range = first.obligation.range;
		let mut sub_count = CountByStepStatus::default();
		for record in &self.obligations {
			range = Range::new(range.start.min(record.obligation.range.start), range.end.max(record.obligation.range.end));
			sub_count += record.counts;
		}
		let finish = self.proof_finish();
		Some(ProofStepDetails {
			kind: "module".into(),
			status: if finish.status == ProofFinishStatus::Failure { "failed" } else { "proved" }.into(),
			location: Location { path: path.into(), range },
			obligations: self.obligations.iter().map(|r| r.obligation.clone()).collect(),
			sub_count,
		})
	}

	/// Overall outcome of the obligation report.
	pub fn proof_finish(&self) -> ProofFinish {
		let total = self.obligations.len();
		let failed = self.obligations.iter().filter(|r| r.is_failed()).count();
		match (total, failed) {
			(0, _) => ProofFinish {
				status: ProofFinishStatus::Skipped,
				reason: "no obligations were checked".into(),
			},
			(_, 0) => ProofFinish {
				status: ProofFinishStatus::Success,
				reason: format!("{total} obligation(s) proved"),
			},
			_ => ProofFinish {
				status: ProofFinishStatus::Failure,
				reason: format!("{failed} of {total} obligation(s) failed"),
			},
		}
	}
}

/// Where continuation text inside an open obligation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
	Normalized,
	ProverObligation(usize),
}

#[derive(Debug)]
struct OpenObligation {
	state: ProofObligationState,
	target: TextTarget,
}

impl OpenObligation {
	fn push_text(&mut self, text: &str) {
		let text = text.trim();
		if text.is_empty() {
			return;
		}
		let slot = match self.target {
			TextTarget::Normalized => &mut self.state.normalized,
			TextTarget::ProverObligation(idx) => self.state.results[idx].obligation.get_or_insert_with(String::new),
		};
		if !slot.is_empty() {
			slot.push('\n');
		}
		slot.push_str(text);
	}
}

/// Line-driven parser for analyzer output.
#[derive(Debug, Default)]
pub struct AnalyzerParser {
	extended: bool,
	state: AnalyzerState,
	pending: Option<PendingDiagnostic>,
	open: Option<OpenObligation>,
	last_parsed: Option<PathBuf>,
	output: AnalyzerOutput,
}

impl AnalyzerParser {
	/// Parser collecting diagnostics only.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parser that also collects proof obligation records.
	pub fn extended() -> Self {
		Self {
			extended: true,
			..Self::default()
		}
	}

	/// Current section state.
	pub fn state(&self) -> AnalyzerState {
		self.state
	}

	fn flush_pending(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.flush_into(&mut self.output.diagnostics);
		}
	}

	fn close_obligation(&mut self, counts: CountByStepStatus) {
		if let Some(open) = self.open.take() {
			self.output.obligations.push(ObligationRecord {
				obligation: open.state,
				counts,
			});
		}
	}

	fn enter(&mut self, section: Section) {
		self.flush_pending();
		self.close_obligation(CountByStepStatus::default());
		self.state = match section {
			Section::Parsing { file } => {
				if let Some(file) = file {
					self.register_module(file);
				}
				AnalyzerState::InParseErrorSection
			}
			Section::SemanticErrors => AnalyzerState::InSemanticErrorSection,
			Section::SemanticWarnings => AnalyzerState::InSemanticWarningSection,
			Section::Obligations => AnalyzerState::InObligationSection,
			Section::Done => AnalyzerState::Idle,
		};
	}

	fn register_module(&mut self, file: PathBuf) {
		if let Some(module) = file.file_stem().and_then(|s| s.to_str()) {
			self.output.module_paths.insert(module.to_owned(), file.clone());
		}
		self.last_parsed = Some(file);
	}

	fn resolve(&self, target: HeaderTarget) -> PathBuf {
		match target {
			HeaderTarget::Path(path) if path.as_os_str() == STDIN_PATH => self.last_parsed.clone().unwrap_or(path),
			HeaderTarget::Path(path) => path,
			HeaderTarget::Module(module) => {
				if let Some(path) = self.output.module_paths.get(&module) {
					return path.clone();
				}
				match &self.last_parsed {
					Some(file) => sibling_module(file, &module),
					None => sibling_module(Path::new(""), &module),
				}
			}
		}
	}

	fn on_location(&mut self, mut header: LocationHeader) {
		self.flush_pending();
		let severity = self.state.severity(&header);
		let first_line = header.message.take();
		let location = ParseLocation {
			path: self.resolve(header.target),
			span: header.span,
		};
		self.pending = Some(PendingDiagnostic::new(location, severity, first_line));
	}

	fn on_status(&mut self, status: Status, raw: &str) {
		match status {
			Status::Obligation {
				role,
				span,
				status,
				normalized,
			} => {
				self.close_obligation(CountByStepStatus::default());
				self.open = Some(OpenObligation {
					state: ProofObligationState {
						role,
						range: span.to_range(),
						status,
						normalized: normalized.unwrap_or_default(),
						results: Vec::new(),
					},
					target: TextTarget::Normalized,
				});
			}
			Status::Prover {
				prover,
				method,
				status,
				reason,
			} => match &mut self.open {
				Some(open) => {
					open.state.results.push(ProofObligationResult {
						prover,
						meth: method.unwrap_or_default(),
						status,
						reason,
						obligation: None,
					});
					open.target = TextTarget::ProverObligation(open.state.results.len() - 1);
				}
				None => tracing::debug!(line = raw, "Prover result without an open obligation"),
			},
			Status::Counts(counts) => {
				if self.open.is_none() {
					tracing::debug!(line = raw, "Obligation counts without an open obligation");
				}
				self.close_obligation(counts);
			}
		}
	}

	fn on_text(&mut self, text: &str) {
		if self.state == AnalyzerState::InObligationSection {
			if let Some(open) = &mut self.open
				&& self.extended
			{
				open.push_text(text);
			}
			return;
		}
		match &mut self.pending {
			Some(pending) => pending.push_line(text),
			None => tracing::trace!(line = text, "Ignoring analyzer output"),
		}
	}
}

impl OutputParser for AnalyzerParser {
	type Output = AnalyzerOutput;
	const TOOL: &'static str = "sany";

	fn feed_line(&mut self, line: &str) {
		match classify(line) {
			Line::Section(section) => self.enter(section),
			Line::Location(_) if self.state == AnalyzerState::InObligationSection => self.on_text(line),
			Line::Location(header) => self.on_location(header),
			Line::Status(status) if self.state == AnalyzerState::InObligationSection => {
				if self.extended {
					self.on_status(status, line);
				}
			}
			Line::Status(_) => self.on_text(line),
			Line::Message(text) | Line::Unrecognized(text) => self.on_text(text),
		}
	}

	fn finish(mut self) -> Self::Output {
		self.flush_pending();
		self.close_obligation(CountByStepStatus::default());
		self.output
	}
}

#[cfg(test)]
mod tests;
