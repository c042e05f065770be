use serde::Serialize;

/// Document position in 0-based line/column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based column offset in the line.
	pub column: u32,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

/// Half-open range between two positions.
///
/// Constructed ranges always satisfy `start <= end` in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
	/// Start position (inclusive).
	pub start: Position,
	/// End position (exclusive).
	pub end: Position,
}

impl Range {
	/// Creates a range, collapsing it onto `start` when `end` precedes it.
	pub fn new(start: Position, end: Position) -> Self {
		Self {
			start,
			end: end.max(start),
		}
	}

	/// Creates a zero-width range at a position.
	pub const fn point(pos: Position) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns true when the range covers no characters.
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true when `pos` lies inside the range (end exclusive).
	pub fn contains(&self, pos: Position) -> bool {
		self.start <= pos && pos < self.end
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_range_new_collapses_inverted_end() {
		let range = Range::new(Position::new(4, 2), Position::new(3, 9));
		assert_eq!(range, Range::point(Position::new(4, 2)));
		assert!(range.is_empty());
	}

	#[test]
	fn test_position_order_is_document_order() {
		assert!(Position::new(1, 40) < Position::new(2, 0));
		assert!(Position::new(2, 3) < Position::new(2, 4));
	}

	#[test]
	fn test_range_contains_is_end_exclusive() {
		let range = Range::new(Position::new(0, 2), Position::new(0, 5));
		assert!(range.contains(Position::new(0, 2)));
		assert!(range.contains(Position::new(0, 4)));
		assert!(!range.contains(Position::new(0, 5)));
	}
}
