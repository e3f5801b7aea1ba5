use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::config::Settings;
use crate::format::engine::FormatEngine;
use crate::format::sorter::{sort_classes, SortOutcome};
use crate::language::LanguageId;
use crate::lsp::backend::{Backend, SORT_COMMAND};
use crate::lsp::document::full_document_range;
use crate::style::StyleResolver;

/// Trait for handling the on-demand sort command
#[tower_lsp::async_trait]
pub trait HandleSortCommand {
    async fn handle_sort_command(&self, params: ExecuteCommandParams) -> LspResult<Option<Value>>;
}

/// Trait for handling the pre-save hook
#[tower_lsp::async_trait]
pub trait HandleWillSave {
    async fn handle_will_save(
        &self,
        params: WillSaveTextDocumentParams,
    ) -> LspResult<Option<Vec<TextEdit>>>;
}

#[tower_lsp::async_trait]
impl HandleSortCommand for Backend {
    async fn handle_sort_command(&self, params: ExecuteCommandParams) -> LspResult<Option<Value>> {
        if params.command != SORT_COMMAND {
            log::warn!("Ignoring unknown command: {}", params.command);
            return Ok(None);
        }

        // The client passes the active document's URI as the sole argument
        let uri = params
            .arguments
            .first()
            .and_then(|arg| arg.as_str())
            .and_then(|s| Url::parse(s).ok());

        let snapshot = match &uri {
            Some(uri) => {
                let docs = self.documents.lock().await;
                docs.get(uri)
                    .map(|doc| (doc.content.clone(), doc.language.clone()))
            }
            None => None,
        };

        let (Some(uri), Some((text, language))) = (uri, snapshot) else {
            self.client
                .show_message(MessageType::WARNING, "No active document to sort.")
                .await;
            return Ok(None);
        };

        let settings = self.settings.lock().await.clone();
        let path = uri_to_path(&uri);
        let root = self.workspace_root_for(&path).await;

        let sorted = match sort_classes(
            &text,
            &language,
            &path,
            root.as_deref(),
            &settings,
            self.style_resolver.as_ref(),
            self.engine.as_ref(),
        )
        .await
        {
            Ok(sorted) => sorted,
            Err(e) => {
                self.client
                    .show_message(
                        MessageType::ERROR,
                        format!("Failed to sort Tailwind CSS classes: {:#}", e),
                    )
                    .await;
                return Ok(None);
            }
        };

        let outcome = if sorted == text {
            SortOutcome::Unchanged
        } else {
            let edit = TextEdit::new(full_document_range(&text), sorted);
            let workspace_edit = WorkspaceEdit {
                changes: Some(HashMap::from([(uri, vec![edit])])),
                ..Default::default()
            };

            match self.client.apply_edit(workspace_edit).await {
                Ok(response) if response.applied => SortOutcome::Sorted,
                // Rejected or transport failure: the document moved on
                _ => SortOutcome::Failed,
            }
        };

        let (message_type, message) = outcome_message(outcome);
        self.client.show_message(message_type, message).await;

        Ok(None)
    }
}

#[tower_lsp::async_trait]
impl HandleWillSave for Backend {
    async fn handle_will_save(
        &self,
        params: WillSaveTextDocumentParams,
    ) -> LspResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;

        let snapshot = {
            let docs = self.documents.lock().await;
            docs.get(&uri)
                .map(|doc| (doc.content.clone(), doc.language.clone()))
        };

        let Some((text, language)) = snapshot else {
            return Ok(None);
        };

        // Only the allow-listed languages are touched on save
        if !language.sortable_on_save() {
            return Ok(None);
        }

        let settings = self.settings.lock().await.clone();
        let path = uri_to_path(&uri);
        let root = self.workspace_root_for(&path).await;

        let edits = compute_save_edits(
            &text,
            &language,
            &path,
            root.as_deref(),
            &settings,
            self.style_resolver.as_ref(),
            self.engine.as_ref(),
        )
        .await;

        Ok(Some(edits))
    }
}

impl Backend {
    /// The workspace root containing `path`, if any
    async fn workspace_root_for(&self, path: &Path) -> Option<PathBuf> {
        let roots = self.workspace_roots.lock().await;
        roots.iter().find(|root| path.starts_with(root)).cloned()
    }
}

/// Compute the save-time edit set. Never fails: any error in the pipeline
/// is logged and degrades to an empty edit set so the save goes through.
pub async fn compute_save_edits(
    text: &str,
    language: &LanguageId,
    file_path: &Path,
    workspace_root: Option<&Path>,
    settings: &Settings,
    style_resolver: &dyn StyleResolver,
    engine: &dyn FormatEngine,
) -> Vec<TextEdit> {
    match sort_classes(
        text,
        language,
        file_path,
        workspace_root,
        settings,
        style_resolver,
        engine,
    )
    .await
    {
        Ok(sorted) if sorted == text => Vec::new(),
        Ok(sorted) => vec![TextEdit::new(full_document_range(text), sorted)],
        Err(e) => {
            log::error!("Sort on save failed: {:#}", e);
            Vec::new()
        }
    }
}

fn uri_to_path(uri: &Url) -> PathBuf {
    uri.to_file_path()
        .unwrap_or_else(|_| PathBuf::from(uri.path()))
}

fn outcome_message(outcome: SortOutcome) -> (MessageType, &'static str) {
    match outcome {
        SortOutcome::Sorted => (
            MessageType::INFO,
            "Tailwind CSS classes sorted successfully!",
        ),
        SortOutcome::Unchanged => (MessageType::INFO, "Tailwind CSS classes are already sorted."),
        SortOutcome::Failed => (
            MessageType::WARNING,
            "Failed to apply edits; the document may have changed.",
        ),
    }
}
