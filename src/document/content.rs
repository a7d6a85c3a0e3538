//! The result of scanning a document: its regions and per-kind views.

use super::position::Position;
use super::region::{Region, RegionKind};

/// A block that was opened but never closed before the end of the document.
///
/// This is bookkeeping for diagnostics only. No region exists for the
/// dangling span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedBlock {
    pub kind: RegionKind,
    /// Position just after the open marker.
    pub open: Position,
}

/// Immutable region model for one text snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    regions: Vec<Region>,
    markdown: Vec<usize>,
    python: Vec<usize>,
    latex: Vec<usize>,
    end: Position,
    unterminated: Option<UnterminatedBlock>,
}

impl DocumentContent {
    /// Build the content from regions already in document order.
    pub(crate) fn new(
        regions: Vec<Region>,
        end: Position,
        unterminated: Option<UnterminatedBlock>,
    ) -> Self {
        let mut markdown = Vec::new();
        let mut python = Vec::new();
        let mut latex = Vec::new();
        for (i, region) in regions.iter().enumerate() {
            match region.kind {
                RegionKind::Markdown => markdown.push(i),
                RegionKind::Python => python.push(i),
                RegionKind::Latex => latex.push(i),
            }
        }

        Self {
            regions,
            markdown,
            python,
            latex,
            end,
            unterminated,
        }
    }

    /// All regions in document order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The regions of one kind, in document order.
    pub fn regions_of(&self, kind: RegionKind) -> RegionView<'_> {
        let indices = match kind {
            RegionKind::Markdown => &self.markdown,
            RegionKind::Python => &self.python,
            RegionKind::Latex => &self.latex,
        };
        RegionView {
            regions: &self.regions,
            indices,
        }
    }

    pub fn markdown_regions(&self) -> RegionView<'_> {
        self.regions_of(RegionKind::Markdown)
    }

    pub fn python_regions(&self) -> RegionView<'_> {
        self.regions_of(RegionKind::Python)
    }

    pub fn latex_regions(&self) -> RegionView<'_> {
        self.regions_of(RegionKind::Latex)
    }

    /// Python and LaTeX regions, in document order.
    pub fn embedded_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.kind.is_embedded())
    }

    /// The end-of-document position, `(line_count, 0)`.
    pub fn end(&self) -> Position {
        self.end
    }

    /// The block left open at end of document, if any.
    pub fn unterminated(&self) -> Option<UnterminatedBlock> {
        self.unterminated
    }
}

/// A read-only view of the regions of a single kind.
#[derive(Debug, Clone, Copy)]
pub struct RegionView<'a> {
    regions: &'a [Region],
    indices: &'a [usize],
}

impl<'a> RegionView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&'a Region> {
        let regions = self.regions;
        self.indices.get(i).map(|&idx| &regions[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Region> + 'a {
        let (regions, indices) = (self.regions, self.indices);
        indices.iter().map(move |&idx| &regions[idx])
    }

    /// Index of the first region for which `pred` is false, assuming `pred`
    /// holds for a prefix of the view.
    pub fn partition_point(&self, mut pred: impl FnMut(&Region) -> bool) -> usize {
        self.indices.partition_point(|&idx| pred(&self.regions[idx]))
    }
}

impl<'a> IntoIterator for RegionView<'a> {
    type Item = &'a Region;
    type IntoIter = Box<dyn Iterator<Item = &'a Region> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
