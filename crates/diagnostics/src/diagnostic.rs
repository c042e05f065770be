use std::fmt;

use serde::Serialize;

use crate::{ParseLocation, Range};

/// Diagnostic severity levels reported by the verification tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	/// Error diagnostics.
	Error,
	/// Warning diagnostics.
	Warning,
}

impl Severity {
	/// Parses a tool severity tag (`error`, `warning`), ignoring case.
	pub fn from_tag(tag: &str) -> Option<Self> {
		if tag.eq_ignore_ascii_case("error") {
			Some(Self::Error)
		} else if tag.eq_ignore_ascii_case("warning") {
			Some(Self::Warning)
		} else {
			None
		}
	}

	/// Lowercase tag as printed by the tools.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Error => "error",
			Self::Warning => "warning",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A positioned error or warning derived from tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	/// Affected range, 0-based and half-open.
	pub range: Range,
	/// Diagnostic severity.
	pub severity: Severity,
	/// Message text, possibly spanning several lines.
	pub message: String,
}

impl Diagnostic {
	/// Creates a new diagnostic.
	pub fn new(range: Range, severity: Severity, message: impl Into<String>) -> Self {
		Self {
			range,
			severity,
			message: message.into(),
		}
	}

	/// Creates an error diagnostic.
	pub fn error(range: Range, message: impl Into<String>) -> Self {
		Self::new(range, Severity::Error, message)
	}

	/// Creates a warning diagnostic.
	pub fn warning(range: Range, message: impl Into<String>) -> Self {
		Self::new(range, Severity::Warning, message)
	}

	/// Creates a diagnostic at a tool location, mapping its coordinates.
	pub fn at(location: &ParseLocation, severity: Severity, message: impl Into<String>) -> Self {
		Self::new(location.to_range(), severity, message)
	}
}
