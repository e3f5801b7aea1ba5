//! Save-hook lifecycle.
//!
//! The pre-save hook is a dynamic `textDocument/willSaveWaitUntil`
//! registration owned by [`SessionState`]. Invariant: at most one
//! registration is live at any time. Configuration changes release the
//! previous registration before acquiring a new one, under a single lock,
//! so no window exists where two hooks coexist.

use tokio::sync::Mutex;
use tower_lsp::lsp_types::{
    DocumentFilter, Registration, TextDocumentRegistrationOptions, Unregistration,
};
use tower_lsp::Client;

use crate::language::LanguageId;

const SAVE_HOOK_ID: &str = "tailwind-sorter-save-hook";
const SAVE_HOOK_METHOD: &str = "textDocument/willSaveWaitUntil";

/// Whether the save hook is currently registered with the client
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum SaveHook {
    #[default]
    Idle,
    Active,
}

/// Process-wide owner of the save-hook registration.
#[derive(Debug, Default)]
pub struct SessionState {
    hook: Mutex<SaveHook>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the save hook with the `formatOnSave` setting.
    ///
    /// Always releases any existing registration first, then registers a
    /// fresh one when `enabled`. Called from `initialized` and from every
    /// configuration-change notification.
    pub async fn sync_save_hook(&self, client: &Client, enabled: bool) {
        let mut hook = self.hook.lock().await;

        if *hook == SaveHook::Active {
            release_registration(client).await;
            *hook = SaveHook::Idle;
        }

        if enabled {
            match client.register_capability(vec![save_hook_registration()]).await {
                Ok(()) => {
                    log::info!("save hook registered");
                    *hook = SaveHook::Active;
                }
                Err(e) => log::warn!("failed to register save hook: {}", e),
            }
        }
    }

    /// Release the hook on teardown. Idempotent.
    pub async fn release(&self, client: &Client) {
        let mut hook = self.hook.lock().await;
        if *hook == SaveHook::Active {
            release_registration(client).await;
            *hook = SaveHook::Idle;
        }
    }

    pub async fn is_active(&self) -> bool {
        *self.hook.lock().await == SaveHook::Active
    }
}

async fn release_registration(client: &Client) {
    let unregistration = Unregistration {
        id: SAVE_HOOK_ID.to_string(),
        method: SAVE_HOOK_METHOD.to_string(),
    };
    if let Err(e) = client.unregister_capability(vec![unregistration]).await {
        log::warn!("failed to release save hook: {}", e);
    } else {
        log::info!("save hook released");
    }
}

fn save_hook_registration() -> Registration {
    let selector: Vec<DocumentFilter> = LanguageId::save_allow_list()
        .into_iter()
        .map(|language| DocumentFilter {
            language: Some(language.to_string()),
            scheme: None,
            pattern: None,
        })
        .collect();

    let options = TextDocumentRegistrationOptions {
        document_selector: Some(selector),
    };

    Registration {
        id: SAVE_HOOK_ID.to_string(),
        method: SAVE_HOOK_METHOD.to_string(),
        register_options: serde_json::to_value(options).ok(),
    }
}
