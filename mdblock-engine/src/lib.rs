//! Stream pumping for incremental markdown block segmentation
//!
//! This crate feeds text deltas from a streaming source through a
//! [`Segmenter`] and hands every complete block to a [`UnitSink`] in stream
//! order. Two architectures are provided:
//!
//! - [`StreamPump`] segments and renders inline on the caller's thread.
//! - [`QueuedPump`] segments on the caller's thread and renders on a worker
//!   thread fed through an unbounded queue.
//!
//! Both apply the same [`EndOfStream`] policy to text left over when the
//! stream ends.

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod pump;
pub mod queued;
pub mod sink;
pub mod source;
pub mod state;

// Re-export key types
pub use buffer::ResidualBuffer;
pub use config::{EndOfStream, PumpConfig};
pub use error::{EngineError, Result};
pub use pump::StreamPump;
pub use queued::{Finished, QueuedPump};
pub use sink::{FnSink, PacedSink, UnitSink};
pub use source::{ChunkedText, SnapshotDiffer};
pub use state::PumpStats;

// Re-export from core for convenience
pub use mdblock_core::{
    DisplayMathPolicy, RenderableUnit, RuleKind, Segmenter, SegmenterConfig, UnitKind,
};
