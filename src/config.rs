//! Configuration management for the class-sorter language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Editor-provided settings (the `tailwindSorter` namespace)
//! - Optional user-level defaults from the config directory

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use serde_json::Value;

/// Command-line arguments for the class-sorter language server
#[derive(Debug, Parser)]
#[command(name = "tailwind-sort-language-server")]
#[command(about = "Language server that sorts Tailwind CSS classes")]
#[command(version)]
pub struct Args {
    /// Command invoking the external formatting engine
    #[arg(
        long,
        default_value = "prettier-tw-helper",
        help = "Formatting engine command (reads JSON on stdin, writes formatted text to stdout)"
    )]
    pub engine_cmd: String,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Formatting engine command
    pub engine_cmd: String,
    /// Log level
    pub log_level: String,
    /// Settings in effect before the editor sends any configuration
    pub initial_settings: Settings,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // User-level defaults hold until the editor pushes its settings
        let initial_settings = load_user_settings().unwrap_or_default();

        Ok(Config {
            engine_cmd: args.engine_cmd,
            log_level: args.log_level,
            initial_settings,
        })
    }
}

/// Load optional defaults from `<config dir>/tailwind-sort-ls/settings.toml`
fn load_user_settings() -> Option<Settings> {
    let path = dirs::config_dir()?
        .join("tailwind-sort-ls")
        .join("settings.toml");
    let content = std::fs::read_to_string(&path).ok()?;

    match toml::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}

/// Live settings from the editor's `tailwindSorter` configuration section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Sort classes automatically before each save
    pub format_on_save: bool,
    /// Helper calls whose string arguments carry class lists
    pub tailwind_functions: Vec<String>,
    /// Markup attributes whose values carry class lists
    pub tailwind_attributes: Vec<String>,
    /// Workspace-relative path to a Tailwind v3 JS config
    pub tailwind_config_path: String,
    /// Workspace-relative path to a Tailwind v4 CSS entry point
    pub tailwind_stylesheet: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            format_on_save: false,
            tailwind_functions: vec![
                "clsx".to_string(),
                "cn".to_string(),
                "cva".to_string(),
                "tw".to_string(),
            ],
            tailwind_attributes: vec!["class".to_string(), "className".to_string()],
            tailwind_config_path: String::new(),
            tailwind_stylesheet: String::new(),
        }
    }
}

impl Settings {
    /// Extract settings from an LSP configuration payload.
    ///
    /// Accepts either the bare section or an object with a
    /// `tailwindSorter` key, as editors differ on which they send.
    /// Returns `None` when the payload has no usable section.
    pub fn from_lsp_value(value: &Value) -> Option<Settings> {
        let section = match value.get("tailwindSorter") {
            Some(section) => section,
            None => value,
        };

        if !section.is_object() {
            return None;
        }

        match serde_json::from_value(section.clone()) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring malformed tailwindSorter settings: {}", e);
                None
            }
        }
    }
}
