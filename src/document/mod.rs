//! Document model: positions, regions, scanning and per-document state.
//!
//! This module provides:
//! - `Position` / `TextRange` coordinates with half-open semantics
//! - `Scanner` partitioning text into Markdown, Python and LaTeX regions
//! - membership queries and the host-only redaction filter
//! - `DocumentState` and `DocumentStore` for document lifecycle management

mod content;
mod filter;
mod position;
mod query;
mod region;
mod scanner;
mod state;
mod text;

pub use content::{DocumentContent, RegionView, UnterminatedBlock};
pub use filter::filter_to_host;
pub use position::{Position, TextRange};
pub use query::{kind_at, point_in_kind, range_intersects_kind, region_at};
pub use region::{Region, RegionKind};
pub use scanner::{scan, Markers, Scanner};
pub use state::{DocumentState, DocumentStore};
pub use text::LineIndex;
