//! Tailwind Class Sorter Language Server
//!
//! A Language Server Protocol implementation that reorders Tailwind CSS
//! utility classes in markup and template files.
//!
//! This library provides:
//! - Formatting-option resolution (user style config, content heuristics)
//! - Delegation to an external formatting engine
//! - LSP protocol implementation (on-demand command and save hook)
//! - Configuration management

pub mod config;
pub mod format;
pub mod indent;
pub mod language;
pub mod lsp;
pub mod style;

// Re-exports for clean public API
pub use config::{Config, Settings};
pub use format::{sort_classes, FormatOptions, SortOutcome};
pub use language::{LanguageId, Parser};
pub use style::{FsStyleResolver, StyleConfig, StyleResolver};
