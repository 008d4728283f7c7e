//! Input handling module

use serde::{Deserialize, Serialize};

pub mod file_reader;
pub mod glob_resolver;
pub mod sse;

pub use file_reader::FileReader;
pub use glob_resolver::expand_pattern;

/// How an input file becomes a stream of deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Plain text replayed in fixed-size deltas
    Text,
    /// Server-sent events carrying cumulative snapshots
    Sse,
}

/// Marker for reading standard input instead of files
pub const STDIN_MARKER: &str = "-";
