//! Discovery of the user's existing style configuration.
//!
//! The sorter must not fight the project's own formatter settings, so
//! before building engine options we look for a prettier-style config file
//! near the document. Lookup is best-effort: a missing or unreadable
//! config is "no configuration found", never an error.

use std::path::Path;

use serde::Deserialize;

/// Config file names checked in each directory, nearest directory first.
const CONFIG_FILE_NAMES: [&str; 3] = [".prettierrc", ".prettierrc.json", ".prettierrc.toml"];

/// Partial style preferences discovered from the user's project.
///
/// Only the fields that influence option resolution are read; anything
/// else in the config file is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub tab_width: Option<usize>,
    pub use_tabs: Option<bool>,
    pub print_width: Option<u32>,
}

/// Resolves the style configuration governing a given file.
pub trait StyleResolver: Send + Sync {
    /// Returns the nearest style config for `path`, or `None` when no
    /// usable config exists. Must not fail.
    fn resolve(&self, path: &Path) -> Option<StyleConfig>;
}

/// Filesystem resolver: walks from the file's directory up to the root,
/// stopping at the first config file found.
#[derive(Debug, Default)]
pub struct FsStyleResolver;

impl StyleResolver for FsStyleResolver {
    fn resolve(&self, path: &Path) -> Option<StyleConfig> {
        let start = if path.is_dir() { path } else { path.parent()? };

        for dir in start.ancestors() {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    // The nearest config governs; if it cannot be parsed
                    // the whole contribution is treated as absent rather
                    // than falling through to an outer config.
                    return load_config_file(&candidate);
                }
            }
        }

        None
    }
}

fn load_config_file(path: &Path) -> Option<StyleConfig> {
    let content = std::fs::read_to_string(path).ok()?;

    let parsed = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    match parsed {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring unparsable style config {}: {}", path.display(), e);
            None
        }
    }
}
