//! Tool-native locations and their mapping into document ranges.
//!
//! Verification tools report 1-based, inclusive `line:column` pairs. The
//! diagnostic model uses 0-based half-open ranges, so every location goes
//! through [`ParseLocation::to_range`] before a diagnostic is recorded.

use std::path::PathBuf;

use crate::{Position, Range};

/// Position as printed by a tool: 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolPosition {
	/// One-based line number.
	pub line: u32,
	/// One-based column number.
	pub column: u32,
}

impl ToolPosition {
	/// Creates a new tool position.
	pub const fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

/// Where a tool placed a message, in the tool's own coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocation {
	/// File the message refers to.
	pub path: PathBuf,
	/// Reported span, or `None` when the tool gave no usable position.
	pub span: Option<ToolSpan>,
}

/// Start and optional end of a reported span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpan {
	/// First character of the span (inclusive).
	pub start: ToolPosition,
	/// Last character of the span (inclusive); `None` when open-ended.
	pub end: Option<ToolPosition>,
}

impl ParseLocation {
	/// Location with a full start/end span.
	pub fn span(path: impl Into<PathBuf>, start: ToolPosition, end: ToolPosition) -> Self {
		Self {
			path: path.into(),
			span: Some(ToolSpan { start, end: Some(end) }),
		}
	}

	/// Location with a known start and no end.
	pub fn point(path: impl Into<PathBuf>, start: ToolPosition) -> Self {
		Self {
			path: path.into(),
			span: Some(ToolSpan { start, end: None }),
		}
	}

	/// Sentinel location for messages without a precise position.
	pub fn unknown(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			span: None,
		}
	}

	/// Returns true for the sentinel location.
	pub fn is_unknown(&self) -> bool {
		self.span.is_none()
	}

	/// Converts the tool span into a 0-based half-open [`Range`].
	pub fn to_range(&self) -> Range {
		self.span.map_or(Range::point(Position::new(0, 0)), ToolSpan::to_range)
	}
}

impl ToolSpan {
	/// Maps `(line, col)-(end_line, end_col)` to `(line-1, col-1)-(end_line-1, end_col)`.
	///
	/// The inclusive end column becomes the exclusive end without adjustment.
	/// A missing end, or one preceding the start, yields a zero-width range.
	pub fn to_range(self) -> Range {
		let start = Position::new(self.start.line.saturating_sub(1), self.start.column.saturating_sub(1));
		match self.end {
			Some(end) => Range::new(start, Position::new(end.line.saturating_sub(1), end.column)),
			None => Range::point(start),
		}
	}
}
