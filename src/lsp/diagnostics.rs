//! Diagnostics for block structure problems.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString};

use crate::document::{DocumentContent, Markers, Position, RegionKind, TextRange};

/// Diagnostic source label.
const SOURCE: &str = "rxlsp";

/// Report a block left open at the end of the document.
///
/// The warning covers the open marker itself. The dangling block has no
/// region, so this is the only place the editor learns about it.
pub fn to_diagnostics(content: &DocumentContent, markers: &Markers) -> Vec<Diagnostic> {
    let Some(block) = content.unterminated() else {
        return Vec::new();
    };

    let marker = match block.kind {
        RegionKind::Python => &markers.python,
        RegionKind::Latex => &markers.latex,
        RegionKind::Markdown => return Vec::new(),
    };
    let marker_len = marker.encode_utf16().count() as u32;
    let start = Position::new(block.open.line, block.open.column.saturating_sub(marker_len));

    vec![Diagnostic {
        range: TextRange::new(start, block.open).into(),
        severity: Some(DiagnosticSeverity::WARNING),
        code: Some(NumberOrString::String("unterminated-block".to_string())),
        code_description: None,
        source: Some(SOURCE.to_string()),
        message: format!(
            "unterminated {} block: missing `{}`",
            block.kind.display_name(),
            markers.close
        ),
        related_information: None,
        tags: None,
        data: None,
    }]
}
