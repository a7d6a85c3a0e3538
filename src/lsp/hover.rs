//! Hover information for embedded blocks.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use crate::document::{region_at, DocumentState, Region};

/// Format the hover text for an embedded block.
fn format_block(region: &Region) -> String {
    // Lines are shown one-based, as editors display them.
    let first = region.start.line + 1;
    let last = region.end.line + 1;
    if first == last {
        format!("**{} block** (line {})", region.kind.display_name(), first)
    } else {
        format!(
            "**{} block** (lines {}-{})",
            region.kind.display_name(),
            first,
            last
        )
    }
}

/// Describe the embedded block under the cursor.
///
/// Markdown and unclassified positions get no hover.
pub fn hover_at_position(state: &DocumentState, position: Position) -> Option<Hover> {
    let region = region_at(position.into(), &state.content)?;
    if !region.kind.is_embedded() {
        return None;
    }

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format_block(region),
        }),
        range: Some(region.range().into()),
    })
}
