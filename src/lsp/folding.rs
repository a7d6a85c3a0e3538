//! Folding ranges for embedded blocks.

use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

use crate::document::DocumentContent;

/// One folding range per multi-line Python or LaTeX block, from its open
/// line to its close line.
pub fn folding_ranges(content: &DocumentContent) -> Vec<FoldingRange> {
    content
        .embedded_regions()
        .filter(|r| r.end.line > r.start.line)
        .map(|r| FoldingRange {
            start_line: r.start.line,
            start_character: Some(r.start.column),
            end_line: r.end.line,
            end_character: Some(r.end.column),
            kind: Some(FoldingRangeKind::Region),
            collapsed_text: Some(r.kind.display_name().to_string()),
        })
        .collect()
}
