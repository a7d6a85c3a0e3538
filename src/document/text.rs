//! Text utilities for per-line access.
//!
//! Provides line lookup and UTF-16 line lengths for LSP features that must
//! emit one token or range per line.

/// Pre-computed line index over a document snapshot.
///
/// Lines are split on `\n` the same way the scanner splits them, so line
/// numbers agree with region positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    /// Source text.
    source: String,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];

        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            source,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of lines, counting a trailing empty line after a final `\n`.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Text of `line` without its terminator (`\n` or `\r\n`).
    pub fn line(&self, line: u32) -> Option<&str> {
        let line = line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - 1) // Exclude newline
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Length of `line` in UTF-16 code units, or 0 past the end.
    pub fn line_len_utf16(&self, line: u32) -> u32 {
        self.line(line)
            .map(|text| text.encode_utf16().count() as u32)
            .unwrap_or(0)
    }
}
