//! Sort invocation: option resolution, engine call, output normalization.

use std::path::Path;

use anyhow::Result;

use crate::config::Settings;
use crate::language::LanguageId;
use crate::style::StyleResolver;

use super::engine::FormatEngine;
use super::options::resolve_options;

/// Outcome of one on-demand sort, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    /// Text changed and the edit was applied
    Sorted,
    /// Engine returned identical text
    Unchanged,
    /// Edit application was rejected (document changed concurrently)
    Failed,
}

/// Sort the class tokens in `text` and return the full new text.
///
/// Resolves the style config and options fresh for this invocation, then
/// delegates to the engine. The engine always terminates its output with a
/// line terminator; when the input had none, the added one is stripped so
/// repeated runs are a fixed point.
pub async fn sort_classes(
    text: &str,
    language: &LanguageId,
    file_path: &Path,
    workspace_root: Option<&Path>,
    settings: &Settings,
    style_resolver: &dyn StyleResolver,
    engine: &dyn FormatEngine,
) -> Result<String> {
    let style = style_resolver.resolve(file_path);
    let options = resolve_options(text, language, file_path, workspace_root, settings, style);

    let had_trailing_newline = text.ends_with('\n');

    let mut formatted = engine.format(text, &options).await?;

    if !had_trailing_newline && formatted.ends_with('\n') {
        formatted.pop();
    }

    Ok(formatted)
}
