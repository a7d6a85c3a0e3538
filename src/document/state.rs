//! Document state management for the rxiv-markdown LSP.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::content::DocumentContent;
use super::filter::filter_to_host;
use super::scanner::Scanner;
use super::text::LineIndex;

/// State for a single open document snapshot.
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Region model computed from `line_index.source()`.
    pub content: DocumentContent,
    /// Pre-computed line index for per-line access.
    pub line_index: LineIndex,
    /// Document version from the client.
    pub version: i32,
}

impl DocumentState {
    /// Create a new document state by scanning the source.
    pub fn new(source: String, version: i32, scanner: &Scanner) -> Self {
        let content = scanner.scan(&source);
        let line_index = LineIndex::new(source);
        Self {
            content,
            line_index,
            version,
        }
    }

    /// The snapshot text.
    pub fn source(&self) -> &str {
        self.line_index.source()
    }

    /// The snapshot text with every embedded-block line blanked.
    pub fn host_text(&self) -> String {
        filter_to_host(self.source(), &self.content)
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or replace a document with a new snapshot.
    pub fn open(
        &self,
        uri: Url,
        source: String,
        version: i32,
        scanner: &Scanner,
    ) -> Arc<DocumentState> {
        let state = Arc::new(DocumentState::new(source, version, scanner));
        log::debug!(
            "scanned {} v{}: {} regions",
            uri,
            version,
            state.content.regions().len()
        );
        self.documents.insert(uri, Arc::clone(&state));
        state
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document's state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Markers, RegionKind};

    fn uri() -> Url {
        Url::parse("file:///tmp/manuscript/01_MAIN.md").unwrap()
    }

    #[test]
    fn open_replaces_previous_snapshot() {
        let scanner = Scanner::new(Markers::default()).unwrap();
        let store = DocumentStore::new();

        let first = store.open(uri(), "plain".to_string(), 1, &scanner);
        assert!(first.content.python_regions().is_empty());

        store.open(uri(), "{{py: x\n}}".to_string(), 2, &scanner);
        let current = store.get(&uri()).unwrap();
        assert_eq!(current.version, 2);
        assert_eq!(current.content.regions_of(RegionKind::Python).len(), 1);

        // The old snapshot is untouched.
        assert_eq!(first.source(), "plain");
        assert!(first.content.python_regions().is_empty());
    }

    #[test]
    fn close_removes_document() {
        let scanner = Scanner::new(Markers::default()).unwrap();
        let store = DocumentStore::new();
        store.open(uri(), "text".to_string(), 1, &scanner);
        store.close(&uri());
        assert!(store.get(&uri()).is_none());
    }

    #[test]
    fn host_text_is_redacted() {
        let scanner = Scanner::new(Markers::default()).unwrap();
        let state = DocumentState::new("a\n{{tex: b\n}}\nc".to_string(), 0, &scanner);
        assert_eq!(state.host_text(), "a\n\n\nc");
    }
}
