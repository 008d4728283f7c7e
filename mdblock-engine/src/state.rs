//! Counters kept by a pump over the life of one stream

use serde::Serialize;

/// Running totals for one stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PumpStats {
    /// Deltas received
    pub deltas: usize,
    /// Bytes received across all deltas
    pub bytes_received: usize,
    /// Bytes taken out of the buffer as units, the final remainder included
    pub bytes_emitted: usize,
    /// Units handed to the sink or queue
    pub units_emitted: usize,
    /// Whether a remainder unit was flushed at stream end
    pub flushed: bool,
    /// Bytes thrown away at stream end or on cancellation
    pub bytes_dropped: usize,
}

impl PumpStats {
    /// Create empty counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an incoming delta
    pub fn record_delta(&mut self, bytes: usize) {
        self.deltas += 1;
        self.bytes_received += bytes;
    }

    /// Record an extracted unit
    pub fn record_unit(&mut self, consumed: usize) {
        self.units_emitted += 1;
        self.bytes_emitted += consumed;
    }

    /// Record the end of the stream
    ///
    /// `bytes` is the buffer length at that point; it counts as emitted when
    /// a remainder unit went out and as dropped otherwise.
    pub fn record_end(&mut self, flushed: bool, bytes: usize) {
        self.flushed = flushed;
        if flushed {
            self.record_unit(bytes);
        } else {
            self.bytes_dropped += bytes;
        }
    }

    /// Bytes still buffered
    pub fn bytes_pending(&self) -> usize {
        self.bytes_received - self.bytes_emitted - self.bytes_dropped
    }
}
