use tla_diagnostics::{Diagnostic, DiagnosticCollection, ParseLocation, Severity};

/// A location header waiting for its message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDiagnostic {
	location: ParseLocation,
	severity: Severity,
	lines: Vec<String>,
}

impl PendingDiagnostic {
	/// Starts a diagnostic, optionally with text printed on the header line.
	pub fn new(location: ParseLocation, severity: Severity, first_line: Option<String>) -> Self {
		Self {
			location,
			severity,
			lines: first_line.into_iter().collect(),
		}
	}

	/// Appends continuation text; blank lines are dropped.
	pub fn push_line(&mut self, text: &str) {
		let text = text.trim();
		if !text.is_empty() {
			self.lines.push(text.to_owned());
		}
	}

	/// Records the diagnostic, mapping the tool location to a range.
	pub fn flush_into(self, collection: &mut DiagnosticCollection) {
		let diagnostic = Diagnostic::at(&self.location, self.severity, self.lines.join("\n"));
		collection.add_one(self.location.path, diagnostic);
	}
}
