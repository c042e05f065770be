//! Parser for the PlusCal transpiler's output.
//!
//! The transpiler prints pairs of a location header and a message body:
//!
//! ```text
//! Queue.tla:12:3-12:9: error
//!     Expected "begin" but found "x"
//! Translation completed.
//! ```
//!
//! Every pair becomes an error diagnostic.

use std::path::{Path, PathBuf};

use tla_diagnostics::{DiagnosticCollection, ParseLocation, Severity};

use crate::line::{HeaderTarget, Line, LocationHeader, STDIN_PATH, classify};
use crate::pending::PendingDiagnostic;
use crate::reader::OutputParser;

/// States of the transpiler parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TranspilerState {
	/// No header seen since the last flush.
	#[default]
	Idle,
	/// A header was seen; its message body is being collected.
	AwaitingMessage(PendingDiagnostic),
}

/// Line-driven parser for transpiler output.
#[derive(Debug)]
pub struct TranspilerParser {
	source: PathBuf,
	state: TranspilerState,
	collection: DiagnosticCollection,
}

impl TranspilerParser {
	/// Creates a parser for a run on `source`.
	///
	/// Headers naming `-`, or a module instead of a file, are attributed to
	/// `source` or to a sibling file.
	pub fn new(source: impl Into<PathBuf>) -> Self {
		Self {
			source: source.into(),
			state: TranspilerState::Idle,
			collection: DiagnosticCollection::new(),
		}
	}

	/// Current state.
	pub fn state(&self) -> &TranspilerState {
		&self.state
	}

	fn flush(&mut self) {
		if let TranspilerState::AwaitingMessage(pending) = std::mem::take(&mut self.state) {
			pending.flush_into(&mut self.collection);
		}
	}

	fn location(&self, header: LocationHeader) -> ParseLocation {
		let path = match header.target {
			HeaderTarget::Path(path) if path.as_os_str() == STDIN_PATH => self.source.clone(),
			HeaderTarget::Path(path) => path,
			HeaderTarget::Module(module) => sibling_module(&self.source, &module),
		};
		ParseLocation { path, span: header.span }
	}
}

/// Path of module `module` next to `file`.
pub(crate) fn sibling_module(file: &Path, module: &str) -> PathBuf {
	file.with_file_name(format!("{module}.tla"))
}

impl OutputParser for TranspilerParser {
	type Output = DiagnosticCollection;
	const TOOL: &'static str = "pluscal";

	fn feed_line(&mut self, line: &str) {
		match classify(line) {
			Line::Location(mut header) => {
				self.flush();
				let first_line = header.message.take();
				let location = self.location(header);
				self.state = TranspilerState::AwaitingMessage(PendingDiagnostic::new(location, Severity::Error, first_line));
			}
			Line::Section(section) => {
				tracing::trace!(?section, "Transpiler section");
				self.flush();
			}
			Line::Message(text) | Line::Unrecognized(text) => match &mut self.state {
				TranspilerState::AwaitingMessage(pending) => pending.push_line(text),
				TranspilerState::Idle => tracing::trace!(line = text, "Ignoring transpiler output"),
			},
			Line::Status(_) => match &mut self.state {
				TranspilerState::AwaitingMessage(pending) => pending.push_line(line),
				TranspilerState::Idle => tracing::trace!(line, "Ignoring transpiler status line"),
			},
		}
	}

	fn finish(mut self) -> Self::Output {
		self.flush();
		self.collection
	}
}
