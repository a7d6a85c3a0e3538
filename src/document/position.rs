//! Line/column positions and half-open ranges.
//!
//! These are plain values with no tie to the LSP types; conversion happens at
//! the protocol edge via the `From` impls below.

use std::fmt;

/// A zero-indexed line/column coordinate.
///
/// Ordering is line first, then column, which the derived `Ord` provides
/// through field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Strictly before `other`.
    pub fn is_before(&self, other: &Position) -> bool {
        self < other
    }

    /// Before or equal to `other`.
    pub fn is_before_or_equal(&self, other: &Position) -> bool {
        self <= other
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<tower_lsp::lsp_types::Position> for Position {
    fn from(p: tower_lsp::lsp_types::Position) -> Self {
        Self::new(p.line, p.character)
    }
}

impl From<Position> for tower_lsp::lsp_types::Position {
    fn from(p: Position) -> Self {
        tower_lsp::lsp_types::Position::new(p.line, p.column)
    }
}

/// A half-open range `[start, end)` over positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "range start {start} is after end {end}");
        Self { start, end }
    }

    /// The range spanning all of `line`, including its terminator.
    pub fn full_line(line: u32) -> Self {
        Self::new(Position::new(line, 0), Position::new(line + 1, 0))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `start <= position < end`.
    pub fn contains(&self, position: Position) -> bool {
        self.start.is_before_or_equal(&position) && position.is_before(&self.end)
    }

    /// Whether the two ranges share at least one position.
    ///
    /// Ranges that only touch at a boundary do not intersect.
    pub fn intersects(&self, other: &TextRange) -> bool {
        !(self.end.is_before_or_equal(&other.start) || other.end.is_before_or_equal(&self.start))
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<TextRange> for tower_lsp::lsp_types::Range {
    fn from(r: TextRange) -> Self {
        tower_lsp::lsp_types::Range::new(r.start.into(), r.end.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_line_then_column() {
        assert!(Position::new(0, 9).is_before(&Position::new(1, 0)));
        assert!(Position::new(2, 3).is_before(&Position::new(2, 4)));
        assert!(!Position::new(2, 4).is_before(&Position::new(2, 4)));
        assert!(Position::new(2, 4).is_before_or_equal(&Position::new(2, 4)));
        assert!(!Position::new(3, 0).is_before_or_equal(&Position::new(2, 9)));
    }

    #[test]
    fn contains_is_half_open() {
        let r = TextRange::new(Position::new(1, 2), Position::new(3, 0));
        assert!(!r.contains(Position::new(1, 1)));
        assert!(r.contains(Position::new(1, 2)));
        assert!(r.contains(Position::new(2, 100)));
        assert!(!r.contains(Position::new(3, 0)));
    }

    #[test]
    fn touching_ranges_do_not_intersect() {
        let a = TextRange::new(Position::new(0, 0), Position::new(1, 4));
        let b = TextRange::new(Position::new(1, 4), Position::new(2, 0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = TextRange::new(Position::new(1, 3), Position::new(1, 5));
        assert!(a.intersects(&c));
        assert!(b.intersects(&c));
    }

    #[test]
    fn empty_range_inside_another_intersects() {
        let outer = TextRange::new(Position::new(0, 0), Position::new(5, 0));
        let empty = TextRange::new(Position::new(2, 0), Position::new(2, 0));
        assert!(empty.is_empty());
        assert!(outer.intersects(&empty));
    }

    #[test]
    fn lsp_conversion() {
        let p = Position::new(4, 7);
        let lsp: tower_lsp::lsp_types::Position = p.into();
        assert_eq!(lsp, tower_lsp::lsp_types::Position::new(4, 7));
        assert_eq!(Position::from(lsp), p);
    }
}
