//! Formatting-options resolution.
//!
//! Builds the option record handed to the external engine by layering,
//! lowest precedence first:
//! 1. Safe defaults that minimize incidental reformatting
//! 2. The user's discovered style config, applied wholesale
//! 3. Indentation derived from the document content
//! 4. Mandatory fields the server always controls
//! 5. Project paths included only when the corresponding setting is set

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Settings;
use crate::indent;
use crate::language::{LanguageId, Parser};
use crate::style::StyleConfig;

/// Plugin the engine loads to reorder class tokens.
pub const TAILWIND_PLUGIN: &str = "prettier-plugin-tailwindcss";

/// Wide enough that the engine never rewraps lines on its own.
const SAFE_PRINT_WIDTH: u32 = 10_000;

/// Indentation width when neither style config nor content says otherwise.
const FALLBACK_TAB_WIDTH: usize = 2;

/// Complete option record for one engine invocation.
///
/// Constructed fresh per invocation by [`resolve_options`]; never cached.
/// Serializes to the camelCase JSON shape the engine expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    pub parser: Parser,
    pub filepath: PathBuf,
    pub print_width: u32,
    pub tab_width: usize,
    pub use_tabs: bool,
    pub html_whitespace_sensitivity: WhitespaceSensitivity,
    pub plugins: Vec<String>,
    pub tailwind_functions: Vec<String>,
    pub tailwind_attributes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailwind_config: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailwind_stylesheet: Option<PathBuf>,
}

/// How the engine treats whitespace inside markup elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceSensitivity {
    Css,
    Ignore,
    Strict,
}

/// Resolve the full option record for one document.
///
/// Deterministic for identical inputs. `style` is the already-resolved
/// user style config; pass `None` when lookup found nothing.
pub fn resolve_options(
    text: &str,
    language: &LanguageId,
    file_path: &Path,
    workspace_root: Option<&Path>,
    settings: &Settings,
    style: Option<StyleConfig>,
) -> FormatOptions {
    let style = style.unwrap_or_default();

    // Layers 1 + 2: safe defaults, then the user's style config on top
    let print_width = style.print_width.unwrap_or(SAFE_PRINT_WIDTH);

    // Layer 3: indentation from the document itself. Tab usage is always
    // content-derived; the width prefers the style config.
    let use_tabs = indent::uses_tabs(text);
    let tab_width = style
        .tab_width
        .or_else(|| indent::detect_tab_width(text))
        .unwrap_or(FALLBACK_TAB_WIDTH);

    // Layer 5: project paths, resolved against the workspace root (or the
    // document's own directory when no root is known)
    let root = workspace_root
        .map(Path::to_path_buf)
        .or_else(|| file_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let tailwind_config = non_empty(&settings.tailwind_config_path).map(|p| resolve_in(&root, p));
    let tailwind_stylesheet = non_empty(&settings.tailwind_stylesheet).map(|p| resolve_in(&root, p));

    // Layer 4 fields are assigned here and nowhere else: the parser, the
    // file path, the plugin and the class-bearing name lists can never be
    // overridden by a style config.
    FormatOptions {
        parser: language.parser(),
        filepath: file_path.to_path_buf(),
        print_width,
        tab_width,
        use_tabs,
        html_whitespace_sensitivity: WhitespaceSensitivity::Ignore,
        plugins: vec![TAILWIND_PLUGIN.to_string()],
        tailwind_functions: settings.tailwind_functions.clone(),
        tailwind_attributes: settings.tailwind_attributes.clone(),
        tailwind_config,
        tailwind_stylesheet,
    }
}

fn non_empty(setting: &str) -> Option<&str> {
    let trimmed = setting.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn resolve_in(root: &Path, relative: &str) -> PathBuf {
    let path = Path::new(relative);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
