use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::{Config, Settings};
use crate::format::engine::FormatEngine;
use crate::language::LanguageId;
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{HandleSortCommand, HandleWillSave};
use crate::lsp::session::SessionState;
use crate::style::StyleResolver;

/// Command identifier for the on-demand sort action
pub const SORT_COMMAND: &str = "tailwindSorter.sortClasses";

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub config: Config,
    pub settings: Arc<Mutex<Settings>>,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub workspace_roots: Arc<Mutex<Vec<PathBuf>>>,
    pub session: SessionState,
    pub engine: Arc<dyn FormatEngine>,
    pub style_resolver: Arc<dyn StyleResolver>,
}

impl Backend {
    pub fn new(
        client: Client,
        config: Config,
        engine: Arc<dyn FormatEngine>,
        style_resolver: Arc<dyn StyleResolver>,
    ) -> Self {
        let settings = Arc::new(Mutex::new(config.initial_settings.clone()));

        Self {
            client,
            config,
            settings,
            documents: Arc::new(Mutex::new(HashMap::new())),
            workspace_roots: Arc::new(Mutex::new(Vec::new())),
            session: SessionState::new(),
            engine,
            style_resolver,
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        // Remember workspace roots for relative config-path resolution
        let mut roots = Vec::new();
        if let Some(folders) = &params.workspace_folders {
            for folder in folders {
                if let Ok(path) = folder.uri.to_file_path() {
                    roots.push(path);
                }
            }
        }
        #[allow(deprecated)]
        if roots.is_empty() {
            if let Some(root_uri) = &params.root_uri {
                if let Ok(path) = root_uri.to_file_path() {
                    roots.push(path);
                }
            }
        }
        *self.workspace_roots.lock().await = roots;

        // Settings may arrive up front as initialization options
        if let Some(options) = &params.initialization_options {
            if let Some(settings) = Settings::from_lsp_value(options) {
                *self.settings.lock().await = settings;
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![SORT_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "tailwind-sort-language-server initialized")
            .await;

        let format_on_save = self.settings.lock().await.format_on_save;
        self.session
            .sync_save_hook(&self.client, format_on_save)
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        self.session.release(&self.client).await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let state = DocumentState {
            content: params.text_document.text,
            language: LanguageId::parse(&params.text_document.language_id),
        };

        let mut docs = self.documents.lock().await;
        docs.insert(uri, state);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            if let Some(state) = docs.get_mut(&uri) {
                state.content = change.text;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let mut docs = self.documents.lock().await;
        docs.remove(&params.text_document.uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if let Some(settings) = Settings::from_lsp_value(&params.settings) {
            *self.settings.lock().await = settings;
        }

        // Re-evaluate the save hook even for tangential changes; the sync
        // is release-then-acquire so duplicates cannot pile up
        let format_on_save = self.settings.lock().await.format_on_save;
        self.session
            .sync_save_hook(&self.client, format_on_save)
            .await;
    }

    async fn will_save_wait_until(
        &self,
        params: WillSaveTextDocumentParams,
    ) -> tower_lsp::jsonrpc::Result<Option<Vec<TextEdit>>> {
        self.handle_will_save(params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> tower_lsp::jsonrpc::Result<Option<serde_json::Value>> {
        self.handle_sort_command(params).await
    }
}
