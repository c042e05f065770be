//! Per-file diagnostic collection.
//!
//! Files keep the order in which they were first reported, and each file's
//! diagnostics keep the order in which the tool printed them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Diagnostic, Severity};

/// Mapping from file path to the ordered diagnostics reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticCollection {
	files: IndexMap<PathBuf, Vec<Diagnostic>>,
}

impl DiagnosticCollection {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a diagnostic to `path`, creating its sequence when absent.
	pub fn add_one(&mut self, path: impl Into<PathBuf>, diagnostic: Diagnostic) {
		self.files.entry(path.into()).or_default().push(diagnostic);
	}

	/// Appends every diagnostic of `other` after the ones already stored for
	/// the same path. No deduplication takes place.
	pub fn add_all(&mut self, other: DiagnosticCollection) {
		for (path, diagnostics) in other.files {
			self.files.entry(path).or_default().extend(diagnostics);
		}
	}

	/// Diagnostics for `path`, or an empty slice for unknown paths.
	pub fn get(&self, path: impl AsRef<Path>) -> &[Diagnostic] {
		self.files.get(path.as_ref()).map_or(&[], Vec::as_slice)
	}

	/// Iterates over files in first-reported order.
	pub fn iter(&self) -> impl Iterator<Item = (&Path, &[Diagnostic])> {
		self.files.iter().map(|(path, diags)| (path.as_path(), diags.as_slice()))
	}

	/// Paths that received at least one diagnostic.
	pub fn paths(&self) -> impl Iterator<Item = &Path> {
		self.files.keys().map(PathBuf::as_path)
	}

	/// Total number of diagnostics across all files.
	pub fn len(&self) -> usize {
		self.files.values().map(Vec::len).sum()
	}

	/// Returns true when no diagnostics were recorded.
	pub fn is_empty(&self) -> bool {
		self.files.values().all(Vec::is_empty)
	}

	/// Number of diagnostics with the given severity.
	pub fn count(&self, severity: Severity) -> usize {
		self.files.values().flatten().filter(|d| d.severity == severity).count()
	}

	/// Returns true when any error was recorded.
	pub fn has_errors(&self) -> bool {
		self.count(Severity::Error) > 0
	}
}

impl IntoIterator for DiagnosticCollection {
	type Item = (PathBuf, Vec<Diagnostic>);
	type IntoIter = indexmap::map::IntoIter<PathBuf, Vec<Diagnostic>>;

	fn into_iter(self) -> Self::IntoIter {
		self.files.into_iter()
	}
}
