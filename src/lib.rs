//! rxiv-markdown language server implementation.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};

pub mod document;
pub mod error;
mod lsp;
pub mod settings;

pub use document::{filter_to_host, scan, DocumentContent, DocumentState, Scanner};
pub use lsp::{
    completion_at_position, folding_ranges, hover_at_position, to_diagnostics,
    tokens_for_document,
};
pub use settings::{build_scanner, discover_settings, load_settings, Settings};

use document::DocumentStore;

/// Method name of the host-only text request.
pub const HOST_TEXT_METHOD: &str = "rxlsp/hostText";

/// Parameters of the `rxlsp/hostText` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostTextParams {
    pub uri: Url,
}

/// Result of the `rxlsp/hostText` request: the document with every
/// embedded-block line blanked, same line count as the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostTextResult {
    pub text: String,
}

/// Configuration resolved at initialization.
#[derive(Debug)]
struct Config {
    scanner: Scanner,
    warn_unterminated: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner: Scanner::default(),
            warn_unterminated: true,
        }
    }
}

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    config: OnceLock<Arc<Config>>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            config: OnceLock::new(),
        }
    }

    fn config(&self) -> Arc<Config> {
        Arc::clone(self.config.get_or_init(|| Arc::new(Config::default())))
    }

    /// Scan document and publish diagnostics.
    async fn on_document_change(&self, uri: Url, text: String, version: i32) {
        let config = self.config();
        let state = self
            .documents
            .open(uri.clone(), text, version, &config.scanner);
        self.publish_diagnostics_for(&uri, &state, &config).await;
    }

    /// Publish diagnostics for a document.
    async fn publish_diagnostics_for(&self, uri: &Url, state: &DocumentState, config: &Config) {
        let diagnostics = if config.warn_unterminated {
            lsp::to_diagnostics(&state.content, config.scanner.markers())
        } else {
            Vec::new()
        };

        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(state.version))
            .await;
    }

    /// Handle `rxlsp/hostText`.
    pub async fn host_text(&self, params: HostTextParams) -> Result<Option<HostTextResult>> {
        let Some(doc) = self.documents.get(&params.uri) else {
            log::debug!("hostText: no document for {}", params.uri);
            return Ok(None);
        };
        Ok(Some(HostTextResult {
            text: doc.host_text(),
        }))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract workspace root from params
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        let config = match workspace_root {
            Some(root) => {
                // Discover settings by walking up the directory tree
                let settings = settings::discover_settings(&root);
                Config {
                    scanner: settings::build_scanner(&settings),
                    warn_unterminated: settings.warn_unterminated_blocks(),
                }
            }
            None => Config::default(),
        };
        let _ = self.config.set(Arc::new(config));

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["{".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            legend: lsp::legend(),
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                            range: None,
                            work_done_progress_options: WorkDoneProgressOptions::default(),
                        },
                    ),
                ),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("server initialized");
        self.client
            .log_message(MessageType::INFO, "rxiv-markdown language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        log::info!("shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.on_document_change(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        )
        .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.on_document_change(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            )
            .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
        // Clear diagnostics
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };
        Ok(lsp::hover_at_position(&doc, position))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(doc) = self.documents.get(uri) else {
            log::debug!("completion: no document for {}", uri);
            return Ok(None);
        };
        let config = self.config();
        Ok(lsp::completion_at_position(
            &doc,
            config.scanner.markers(),
            position,
        ))
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let Some(doc) = self.documents.get(&params.text_document.uri) else {
            return Ok(None);
        };
        Ok(Some(lsp::folding_ranges(&doc.content)))
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = &params.text_document.uri;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };

        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data: lsp::tokens_for_document(&doc),
        })))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(Backend::new)
        .custom_method(HOST_TEXT_METHOD, Backend::host_text)
        .finish()
}
