//! Semantic tokens marking embedded Python and LaTeX blocks.
//!
//! Tokens cannot span lines, so each block is emitted as one token per line
//! it covers, clipped to the block's start and end columns.

use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

use crate::document::{DocumentState, Region, RegionKind};

/// Token type indices (must match LEGEND order).
pub mod token_types {
    pub const PYTHON_BLOCK: u32 = 0;
    pub const LATEX_BLOCK: u32 = 1;
}

/// Get the semantic tokens legend for capability declaration.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::new("pythonBlock"),
            SemanticTokenType::new("latexBlock"),
        ],
        token_modifiers: vec![],
    }
}

/// A raw token before delta encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawToken {
    line: u32,
    start: u32,
    length: u32,
    token_type: u32,
}

/// Semantic tokens for every embedded block in the document.
pub fn tokens_for_document(state: &DocumentState) -> Vec<SemanticToken> {
    let mut raw = Vec::new();
    for region in state.content.embedded_regions() {
        push_region(&mut raw, region, state);
    }
    encode_tokens(&raw)
}

fn push_region(tokens: &mut Vec<RawToken>, region: &Region, state: &DocumentState) {
    let token_type = match region.kind {
        RegionKind::Python => token_types::PYTHON_BLOCK,
        RegionKind::Latex => token_types::LATEX_BLOCK,
        RegionKind::Markdown => return,
    };

    for line in region.start.line..=region.end.line {
        let start = if line == region.start.line {
            region.start.column
        } else {
            0
        };
        let end = if line == region.end.line {
            region.end.column
        } else {
            state.line_index.line_len_utf16(line)
        };
        if start < end {
            tokens.push(RawToken {
                line,
                start,
                length: end - start,
                token_type,
            });
        }
    }
}

/// Convert raw tokens (already in document order) to delta-encoded tokens.
fn encode_tokens(tokens: &[RawToken]) -> Vec<SemanticToken> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let delta_line = token.line - prev_line;
        let delta_start = if delta_line == 0 {
            token.start - prev_start
        } else {
            token.start
        };

        result.push(SemanticToken {
            delta_line,
            delta_start,
            length: token.length,
            token_type: token.token_type,
            token_modifiers_bitset: 0,
        });

        prev_line = token.line;
        prev_start = token.start;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Scanner;

    fn tokens(source: &str) -> Vec<SemanticToken> {
        let state = DocumentState::new(source.to_string(), 0, &Scanner::default());
        tokens_for_document(&state)
    }

    #[test]
    fn legend_has_block_types() {
        let leg = legend();
        assert_eq!(leg.token_types.len(), 2);
        assert_eq!(leg.token_types[0].as_str(), "pythonBlock");
    }

    #[test]
    fn host_only_document_has_no_tokens() {
        assert!(tokens("# Title\n\nSome text }}").is_empty());
    }

    #[test]
    fn one_token_per_block_line() {
        // line 1: "{{py: x = 1" -> token from col 5 to 11
        // line 2: "print(x)"    -> full line, 8
        // line 3: "}}"          -> cols 0..2
        let toks = tokens("intro\n{{py: x = 1\nprint(x)\n}}\nend");
        assert_eq!(toks.len(), 3);

        assert_eq!(toks[0].delta_line, 1);
        assert_eq!(toks[0].delta_start, 5);
        assert_eq!(toks[0].length, 6);
        assert_eq!(toks[0].token_type, token_types::PYTHON_BLOCK);

        assert_eq!(toks[1].delta_line, 1);
        assert_eq!(toks[1].delta_start, 0);
        assert_eq!(toks[1].length, 8);

        assert_eq!(toks[2].delta_line, 1);
        assert_eq!(toks[2].delta_start, 0);
        assert_eq!(toks[2].length, 2);
    }

    #[test]
    fn empty_lines_inside_block_are_skipped() {
        let toks = tokens("{{tex:\n\n\\alpha\n}}");
        // "{{tex:" has nothing after the marker, line 1 is empty
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].delta_line, 2);
        assert_eq!(toks[0].length, 6);
        assert_eq!(toks[0].token_type, token_types::LATEX_BLOCK);
        assert_eq!(toks[1].delta_line, 1);
    }
}
