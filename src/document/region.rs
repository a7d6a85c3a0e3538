//! Typed language regions within an rxiv-markdown document.

use std::fmt;

use super::position::{Position, TextRange};

/// The language a region of the document is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Host markup outside any embedded block.
    Markdown,
    /// Contents of a `{{py:` block.
    Python,
    /// Contents of a `{{tex:` block.
    Latex,
}

impl RegionKind {
    pub const ALL: [RegionKind; 3] = [RegionKind::Markdown, RegionKind::Python, RegionKind::Latex];

    /// Whether this kind is one of the embedded (non-host) languages.
    pub fn is_embedded(self) -> bool {
        !matches!(self, RegionKind::Markdown)
    }

    /// Human-readable language name.
    pub fn display_name(self) -> &'static str {
        match self {
            RegionKind::Markdown => "Markdown",
            RegionKind::Python => "Python",
            RegionKind::Latex => "LaTeX",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RegionKind::Markdown => "markdown",
            RegionKind::Python => "python",
            RegionKind::Latex => "latex",
        };
        f.write_str(tag)
    }
}

/// A half-open span `[start, end)` of a single language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub start: Position,
    pub end: Position,
    pub kind: RegionKind,
}

impl Region {
    pub fn new(start: Position, end: Position, kind: RegionKind) -> Self {
        Self { start, end, kind }
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Check if this region contains the given position.
    pub fn contains(&self, position: Position) -> bool {
        self.range().contains(position)
    }

    /// Check if this region overlaps `range`. Touching is not overlapping.
    pub fn intersects(&self, range: &TextRange) -> bool {
        self.range().intersects(range)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.kind, self.start, self.end)
    }
}
