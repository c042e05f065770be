//! Destinations for the raw lines of a tool run.
//!
//! Sinks are passed to whoever runs a tool, so parsers stay usable without an
//! editor host. [`Tee`] forwards each line to a sink before parsing it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::OutputParser;

/// Receives every raw line a tool prints.
pub trait OutputSink: Send + Sync {
	/// Called once per line, in output order.
	fn line(&self, tool: &str, line: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &S {
	fn line(&self, tool: &str, line: &str) {
		(**self).line(tool, line);
	}
}

impl<S: OutputSink + ?Sized> OutputSink for Arc<S> {
	fn line(&self, tool: &str, line: &str) {
		(**self).line(tool, line);
	}
}

/// Discards all lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
	fn line(&self, _tool: &str, _line: &str) {}
}

/// Logs every line at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
	fn line(&self, tool: &str, line: &str) {
		tracing::debug!(tool, "{line}");
	}
}

/// Keeps lines in memory, tagged with the tool that printed them.
#[derive(Debug, Default)]
pub struct BufferSink {
	lines: Mutex<Vec<(String, String)>>,
}

impl BufferSink {
	/// Creates an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Lines recorded so far for `tool`.
	pub fn lines_for(&self, tool: &str) -> Vec<String> {
		self.lines.lock().iter().filter(|(t, _)| t == tool).map(|(_, l)| l.clone()).collect()
	}

	/// Removes and returns every recorded `(tool, line)` pair.
	pub fn take(&self) -> Vec<(String, String)> {
		std::mem::take(&mut *self.lines.lock())
	}
}

impl OutputSink for BufferSink {
	fn line(&self, tool: &str, line: &str) {
		self.lines.lock().push((tool.to_owned(), line.to_owned()));
	}
}

/// Parser adapter copying each line to a sink.
#[derive(Debug)]
pub struct Tee<P, S> {
	parser: P,
	sink: S,
}

impl<P, S> Tee<P, S> {
	/// Wraps `parser`, copying lines to `sink`.
	pub fn new(parser: P, sink: S) -> Self {
		Self { parser, sink }
	}
}

impl<P: OutputParser, S: OutputSink> OutputParser for Tee<P, S> {
	type Output = P::Output;
	const TOOL: &'static str = P::TOOL;

	fn feed_line(&mut self, line: &str) {
		self.sink.line(P::TOOL, line);
		self.parser.feed_line(line);
	}

	fn finish(self) -> Self::Output {
		self.parser.finish()
	}
}
