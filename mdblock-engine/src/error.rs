//! Engine error types

use mdblock_core::CoreError;
use thiserror::Error;

/// Errors raised while pumping a stream
#[derive(Error, Debug)]
pub enum EngineError {
    /// Segmenter could not be built
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The sink failed to handle a unit
    #[error("sink rejected unit: {0}")]
    Sink(String),

    /// The render queue is no longer accepting units
    #[error("render queue closed")]
    QueueClosed,

    /// The render worker thread panicked
    #[error("render worker panicked")]
    WorkerPanicked,

    /// A cumulative snapshot did not extend the text seen so far
    #[error("snapshot diverged from the text seen so far (seen {seen} bytes, snapshot {snapshot} bytes)")]
    SnapshotDiverged {
        /// Bytes of text seen before the snapshot
        seen: usize,
        /// Length of the rejected snapshot
        snapshot: usize,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl EngineError {
    /// Wrap a sink failure
    pub fn sink(reason: impl std::fmt::Display) -> Self {
        EngineError::Sink(reason.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
