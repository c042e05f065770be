//! Jump targets within a module.

use lsp_types::SymbolKind;
use tla_diagnostics::Range;

use crate::DocumentInfo;

/// A theorem or function the user can jump to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
	pub label: String,
	/// `(Theorem)` or `(Function)`.
	pub description: &'static str,
	/// Full extent of the definition, to be revealed.
	pub range: Range,
}

impl NavigationItem {
	/// Cursor placement after the jump: the start of the definition.
	pub fn selection(&self) -> Range {
		Range::point(self.range.start)
	}
}

/// Theorems and functions of `document`, in outline order.
pub fn navigation_targets(document: &DocumentInfo) -> Vec<NavigationItem> {
	document
		.symbols
		.iter()
		.filter_map(|symbol| {
			let description = match symbol.kind {
				SymbolKind::BOOLEAN => "(Theorem)",
				SymbolKind::FUNCTION => "(Function)",
				_ => return None,
			};
			Some(NavigationItem {
				label: symbol.name.clone(),
				description,
				range: symbol.range,
			})
		})
		.collect()
}
