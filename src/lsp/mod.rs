//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Diagnostics for unterminated blocks
//! - Hover and folding for embedded blocks
//! - Semantic tokens marking Python and LaTeX regions
//! - Block skeleton completion in Markdown

mod completion;
mod diagnostics;
mod folding;
mod hover;
mod semantic_tokens;

pub use completion::completion_at_position;
pub use diagnostics::to_diagnostics;
pub use folding::folding_ranges;
pub use hover::hover_at_position;
pub use semantic_tokens::{legend, tokens_for_document};
