//! Line-based boundary scanner that partitions a document into regions.
//!
//! Blocks are recognised one line at a time:
//! - an open line starts with optional spaces then `{{py:` or `{{tex:`,
//!   followed by anything;
//! - a close line is optional spaces, `}}`, then only spaces.
//!
//! Region boundaries sit right after the marker token on its line.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SettingsError};

use super::content::{DocumentContent, UnterminatedBlock};
use super::position::Position;
use super::region::{Region, RegionKind};

/// The literal markers delimiting embedded blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub python: String,
    pub latex: String,
    pub close: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            python: "{{py:".to_string(),
            latex: "{{tex:".to_string(),
            close: "}}".to_string(),
        }
    }
}

impl Markers {
    /// Reject marker sets the scanner cannot tell apart.
    pub fn validate(&self) -> Result<()> {
        for (name, marker) in [
            ("python", &self.python),
            ("latex", &self.latex),
            ("close", &self.close),
        ] {
            if marker.is_empty() {
                return Err(SettingsError::InvalidMarkers(format!(
                    "{} marker is empty",
                    name
                )));
            }
        }
        if self.python.starts_with(&self.latex) || self.latex.starts_with(&self.python) {
            return Err(SettingsError::InvalidMarkers(format!(
                "open markers '{}' and '{}' overlap",
                self.python, self.latex
            )));
        }
        Ok(())
    }
}

/// Where the scanner is between lines.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Outside any block; host text began at `start`.
    Markdown { start: Position },
    /// Inside a block of `kind` whose content began at `open`.
    Embedded { kind: RegionKind, open: Position },
}

/// A compiled set of line triggers.
#[derive(Debug, Clone)]
pub struct Scanner {
    markers: Markers,
    python_open: Regex,
    latex_open: Regex,
    close: Regex,
}

static DEFAULT_SCANNER: LazyLock<Scanner> =
    LazyLock::new(|| Scanner::new(Markers::default()).unwrap());

/// Scan `text` with the default `{{py:` / `{{tex:` / `}}` markers.
pub fn scan(text: &str) -> DocumentContent {
    DEFAULT_SCANNER.scan(text)
}

impl Default for Scanner {
    fn default() -> Self {
        DEFAULT_SCANNER.clone()
    }
}

impl Scanner {
    /// Compile line triggers for the given markers.
    pub fn new(markers: Markers) -> Result<Self> {
        markers.validate()?;
        let python_open = Regex::new(&format!("^( *){}", regex::escape(&markers.python)))?;
        let latex_open = Regex::new(&format!("^( *){}", regex::escape(&markers.latex)))?;
        let close = Regex::new(&format!("^( *){} *$", regex::escape(&markers.close)))?;
        Ok(Self {
            markers,
            python_open,
            latex_open,
            close,
        })
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Partition `text` into regions.
    ///
    /// Never fails. An open marker inside a block and a close marker outside
    /// one are ordinary content. A block still open at the end of the text
    /// yields no region at all.
    pub fn scan(&self, text: &str) -> DocumentContent {
        let mut regions = Vec::new();
        let mut state = State::Markdown {
            start: Position::default(),
        };
        let mut line_count = 0u32;

        for (line_no, raw) in text.split('\n').enumerate() {
            line_count += 1;
            let line_no = line_no as u32;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            state = match state {
                State::Markdown { start } => match self.match_open(line) {
                    Some((kind, column)) => {
                        let open = Position::new(line_no, column);
                        if start.is_before(&open) {
                            regions.push(Region::new(start, open, RegionKind::Markdown));
                        }
                        State::Embedded { kind, open }
                    }
                    None => state,
                },
                State::Embedded { kind, open } => match self.match_close(line) {
                    Some(column) => {
                        let close = Position::new(line_no, column);
                        regions.push(Region::new(open, close, kind));
                        State::Markdown { start: close }
                    }
                    None => state,
                },
            };
        }

        let end = Position::new(line_count, 0);
        let unterminated = match state {
            State::Markdown { start } => {
                if start.is_before(&end) {
                    regions.push(Region::new(start, end, RegionKind::Markdown));
                }
                None
            }
            State::Embedded { kind, open } => Some(UnterminatedBlock { kind, open }),
        };

        DocumentContent::new(regions, end, unterminated)
    }

    /// Match an open line, returning the block kind and the column just past
    /// the marker.
    fn match_open(&self, line: &str) -> Option<(RegionKind, u32)> {
        let (kind, marker, captures) = if let Some(c) = self.python_open.captures(line) {
            (RegionKind::Python, &self.markers.python, c)
        } else {
            let c = self.latex_open.captures(line)?;
            (RegionKind::Latex, &self.markers.latex, c)
        };
        let indent = captures.get(1).map_or(0, |m| m.len());
        Some((kind, column_after(indent, marker)))
    }

    /// Match a close line, returning the column just past the marker.
    fn match_close(&self, line: &str) -> Option<u32> {
        let captures = self.close.captures(line)?;
        let indent = captures.get(1).map_or(0, |m| m.len());
        Some(column_after(indent, &self.markers.close))
    }
}

/// Column just past `marker` after `indent` spaces, in UTF-16 units.
fn column_after(indent: usize, marker: &str) -> u32 {
    (indent + marker.encode_utf16().count()) as u32
}
