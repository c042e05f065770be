use lsp_types::SymbolKind;
use tla_diagnostics::{Position, Range};

/// A symbol defined in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
	pub name: String,
	/// Theorems are reported as [`SymbolKind::BOOLEAN`].
	pub kind: SymbolKind,
	pub range: Range,
}

impl SymbolInfo {
	pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
		Self {
			name: name.into(),
			kind,
			range,
		}
	}
}

/// What is known about one open module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
	pub symbols: Vec<SymbolInfo>,
	/// Extent of the PlusCal algorithm comment.
	pub plus_cal: Option<Range>,
}

impl DocumentInfo {
	/// Returns true when `pos` is inside the PlusCal algorithm, bounds included.
	pub fn is_plus_cal_at(&self, pos: Position) -> bool {
		self.plus_cal.is_some_and(|range| range.start <= pos && pos <= range.end)
	}
}
