//! Conversions into [`lsp_types`] for editor hosts.

use crate::{Diagnostic, Position, Range, Severity};

/// Value of the `source` field on converted diagnostics.
pub const DIAGNOSTIC_SOURCE: &str = "tla";

impl From<Position> for lsp_types::Position {
	fn from(pos: Position) -> Self {
		lsp_types::Position::new(pos.line, pos.column)
	}
}

impl From<lsp_types::Position> for Position {
	fn from(pos: lsp_types::Position) -> Self {
		Position::new(pos.line, pos.character)
	}
}

impl From<Range> for lsp_types::Range {
	fn from(range: Range) -> Self {
		lsp_types::Range::new(range.start.into(), range.end.into())
	}
}

impl From<lsp_types::Range> for Range {
	fn from(range: lsp_types::Range) -> Self {
		Range::new(range.start.into(), range.end.into())
	}
}

impl From<Severity> for lsp_types::DiagnosticSeverity {
	fn from(severity: Severity) -> Self {
		match severity {
			Severity::Error => lsp_types::DiagnosticSeverity::ERROR,
			Severity::Warning => lsp_types::DiagnosticSeverity::WARNING,
		}
	}
}

impl From<&Diagnostic> for lsp_types::Diagnostic {
	fn from(diag: &Diagnostic) -> Self {
		lsp_types::Diagnostic {
			range: diag.range.into(),
			severity: Some(diag.severity.into()),
			source: Some(DIAGNOSTIC_SOURCE.into()),
			message: diag.message.clone(),
			..Default::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_diagnostic_to_lsp() {
		let diag = Diagnostic::warning(Range::new(Position::new(2, 4), Position::new(2, 12)), "shadowed");
		let lsp: lsp_types::Diagnostic = (&diag).into();
		assert_eq!(lsp.range.start, lsp_types::Position::new(2, 4));
		assert_eq!(lsp.range.end, lsp_types::Position::new(2, 12));
		assert_eq!(lsp.severity, Some(lsp_types::DiagnosticSeverity::WARNING));
		assert_eq!(lsp.source.as_deref(), Some("tla"));
		assert_eq!(lsp.message, "shadowed");
	}

	#[test]
	fn test_lsp_range_keeps_ordering() {
		let inverted = lsp_types::Range::new(lsp_types::Position::new(3, 0), lsp_types::Position::new(1, 0));
		let range: Range = inverted.into();
		assert!(range.start <= range.end);
	}
}
