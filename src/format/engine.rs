//! External formatting engine contract.
//!
//! The class-ordering work itself is delegated to a pluggable engine; this
//! server only hands it text plus resolved options and takes back the
//! reformatted text. The production engine is a helper process (prettier
//! with prettier-plugin-tailwindcss behind a thin shim) spoken to over
//! stdin/stdout.

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::options::FormatOptions;

/// The delegated formatting engine: text + options in, text out.
#[tower_lsp::async_trait]
pub trait FormatEngine: Send + Sync {
    /// Reformat `text` under `options`. Errors (unparsable syntax, bad
    /// options) must surface to the caller; the engine never retries.
    async fn format(&self, text: &str, options: &FormatOptions) -> Result<String>;
}

/// Wire request written to the helper's stdin as one JSON document.
#[derive(Serialize)]
struct EngineRequest<'a> {
    text: &'a str,
    options: &'a FormatOptions,
}

/// Engine backed by an external helper command.
///
/// One process per invocation; the helper reads a JSON request on stdin,
/// writes the formatted text to stdout, and reports failure through a
/// non-zero exit with the message on stderr.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    command: String,
}

impl CommandEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[tower_lsp::async_trait]
impl FormatEngine for CommandEngine {
    async fn format(&self, text: &str, options: &FormatOptions) -> Result<String> {
        let payload = serde_json::to_vec(&EngineRequest { text, options })
            .context("failed to encode engine request")?;

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn formatting engine '{}'", self.command))?;

        let mut stdin = child
            .stdin
            .take()
            .context("formatting engine stdin unavailable")?;
        stdin
            .write_all(&payload)
            .await
            .context("failed to write request to formatting engine")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("failed to wait for formatting engine")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "formatting engine '{}' failed: {}",
                self.command,
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout)
            .context("formatting engine produced non-UTF-8 output")
    }
}
