//! Completion of embedded block skeletons.
//!
//! Blocks only open at the start of a line (after optional spaces), so items
//! are offered when the text before the cursor is indentation plus a prefix
//! of an open marker, and only while the cursor is in Markdown.

use tower_lsp::lsp_types::*;

use crate::document::{point_in_kind, DocumentState, Markers, RegionKind};

/// The line text before `character` (a UTF-16 column).
///
/// A column inside a surrogate pair stops before that character.
fn line_prefix(line: &str, character: u32) -> &str {
    let mut units = 0u32;
    for (i, c) in line.char_indices() {
        units += c.len_utf16() as u32;
        if units > character {
            return &line[..i];
        }
    }
    line
}

fn block_item(
    kind: RegionKind,
    marker: &str,
    close: &str,
    replace: Range,
) -> CompletionItem {
    let snippet = format!("{} ${{1}}\n$0\n{}", marker, close);
    CompletionItem {
        label: marker.to_string(),
        kind: Some(CompletionItemKind::SNIPPET),
        detail: Some(format!("{} block", kind.display_name())),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range: replace,
            new_text: snippet,
        })),
        ..Default::default()
    }
}

/// Get block completions at the given position.
pub fn completion_at_position(
    state: &DocumentState,
    markers: &Markers,
    position: Position,
) -> Option<CompletionResponse> {
    if !point_in_kind(position.into(), &state.content, RegionKind::Markdown) {
        return None;
    }

    let line = state.line_index.line(position.line)?;
    let before = line_prefix(line, position.character);
    let typed = before.trim_start_matches(' ');
    if typed.contains(char::is_whitespace) {
        return None;
    }

    let typed_len = typed.encode_utf16().count() as u32;
    let replace = Range::new(
        Position::new(position.line, position.character.saturating_sub(typed_len)),
        position,
    );

    let items: Vec<CompletionItem> = [
        (RegionKind::Python, &markers.python),
        (RegionKind::Latex, &markers.latex),
    ]
    .into_iter()
    .filter(|(_, marker)| marker.starts_with(typed))
    .map(|(kind, marker)| block_item(kind, marker, &markers.close, replace))
    .collect();

    if items.is_empty() {
        None
    } else {
        Some(CompletionResponse::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Scanner;

    fn labels(source: &str, position: Position) -> Vec<String> {
        let state = DocumentState::new(source.to_string(), 0, &Scanner::default());
        match completion_at_position(&state, &Markers::default(), position) {
            Some(CompletionResponse::Array(items)) => items.into_iter().map(|i| i.label).collect(),
            _ => vec![],
        }
    }

    #[test]
    fn offers_both_blocks_on_empty_line() {
        assert_eq!(
            labels("intro\n\nend", Position::new(1, 0)),
            vec!["{{py:", "{{tex:"]
        );
    }

    #[test]
    fn filters_by_typed_prefix() {
        assert_eq!(labels("  {{t", Position::new(0, 5)), vec!["{{tex:"]);
    }

    #[test]
    fn replaces_typed_prefix() {
        let state = DocumentState::new("  {{p".to_string(), 0, &Scanner::default());
        let Some(CompletionResponse::Array(items)) =
            completion_at_position(&state, &Markers::default(), Position::new(0, 5))
        else {
            panic!("expected completions");
        };
        let Some(CompletionTextEdit::Edit(edit)) = &items[0].text_edit else {
            panic!("expected text edit");
        };
        assert_eq!(
            edit.range,
            Range::new(Position::new(0, 2), Position::new(0, 5))
        );
        assert_eq!(edit.new_text, "{{py: ${1}\n$0\n}}");
    }

    #[test]
    fn nothing_after_prose() {
        assert!(labels("some text ", Position::new(0, 10)).is_empty());
    }

    #[test]
    fn column_inside_surrogate_pair() {
        assert_eq!(line_prefix("a\u{1F600}{{", 2), "a");
        let state = DocumentState::new("\u{1F600}".to_string(), 0, &Scanner::default());
        let Some(CompletionResponse::Array(items)) =
            completion_at_position(&state, &Markers::default(), Position::new(0, 1))
        else {
            panic!("expected completions");
        };
        let Some(CompletionTextEdit::Edit(edit)) = &items[0].text_edit else {
            panic!("expected text edit");
        };
        assert_eq!(
            edit.range,
            Range::new(Position::new(0, 1), Position::new(0, 1))
        );
    }

    #[test]
    fn nothing_inside_embedded_block() {
        assert!(labels("{{py: x\n\n}}", Position::new(1, 0)).is_empty());
    }
}
