//! Host-only redaction of a document.
//!
//! Tools that only understand markdown get the document with every line that
//! touches an embedded block blanked out. Line numbering is preserved so their
//! diagnostics still point at the right place.

use super::content::DocumentContent;
use super::position::TextRange;
use super::query::range_intersects_kind;
use super::region::RegionKind;

/// Blank every line that overlaps a Python or LaTeX region.
///
/// The result has exactly as many lines as `text`. Lines inside an
/// unterminated trailing block are kept, since no region covers them.
pub fn filter_to_host(text: &str, content: &DocumentContent) -> String {
    let mut out = String::with_capacity(text.len());

    for (line_no, line) in text.split('\n').enumerate() {
        if line_no > 0 {
            out.push('\n');
        }
        let range = TextRange::full_line(line_no as u32);
        let embedded = range_intersects_kind(range, content, RegionKind::Python)
            || range_intersects_kind(range, content, RegionKind::Latex);
        if !embedded {
            out.push_str(line);
        }
    }

    out
}
