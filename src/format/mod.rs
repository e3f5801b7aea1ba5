//! Formatting Orchestration
//!
//! Option resolution, the external-engine contract, and the sort
//! invocation that ties them together.

pub mod engine;
pub mod options;
pub mod sorter;

pub use engine::{CommandEngine, FormatEngine};
pub use options::{resolve_options, FormatOptions, WhitespaceSensitivity};
pub use sorter::{sort_classes, SortOutcome};
