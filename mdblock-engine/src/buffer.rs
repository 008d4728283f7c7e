//! Residual text buffer between deltas

use crate::config::EndOfStream;
use mdblock_core::{remainder_unit, RenderableUnit, Segmenter};

/// Text received but not yet emitted as a unit
///
/// After every append the owner drains complete units with
/// [`ResidualBuffer::take_unit`] until it returns `None`, so the buffer never
/// holds a unit that should already have gone out.
#[derive(Debug, Default)]
pub struct ResidualBuffer {
    /// Pending text
    data: String,
}

impl ResidualBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta from the stream source
    pub fn push(&mut self, delta: &str) {
        self.data.push_str(delta);
    }

    /// Extract the next complete unit and drop the text it consumed
    ///
    /// Returns the unit and the number of bytes removed.
    pub fn take_unit(&mut self, segmenter: &Segmenter) -> Option<(RenderableUnit, usize)> {
        let extraction = segmenter.segment(&self.data)?;
        self.data.drain(..extraction.consumed);
        Some((extraction.unit, extraction.consumed))
    }

    /// Empty the buffer at stream end according to `policy`
    ///
    /// Returns the flushed unit, if any, and the number of bytes dropped.
    pub fn take_remainder(&mut self, policy: EndOfStream) -> (Option<RenderableUnit>, usize) {
        let unit = match policy {
            EndOfStream::Flush => remainder_unit(&self.data),
            EndOfStream::Discard => None,
        };
        let dropped = self.data.len();
        self.data.clear();
        (unit, dropped)
    }

    /// Drop everything
    pub fn clear(&mut self) -> usize {
        let dropped = self.data.len();
        self.data.clear();
        dropped
    }

    /// Pending text
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Pending bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
