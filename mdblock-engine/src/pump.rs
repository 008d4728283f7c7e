//! Synchronous stream pump
//!
//! Each [`StreamPump::append`] runs segmentation and calls the sink on the
//! thread that delivered the delta. Units reach the sink in stream order, one
//! at a time; a sink that blocks holds up the next delta.

use crate::buffer::ResidualBuffer;
use crate::config::{EndOfStream, PumpConfig};
use crate::error::Result;
use crate::sink::UnitSink;
use crate::state::PumpStats;
use mdblock_core::{RenderableUnit, Segmenter};

/// Buffer, segmenter and counters shared by both pump architectures
#[derive(Debug)]
pub(crate) struct Intake {
    segmenter: Segmenter,
    end_of_stream: EndOfStream,
    buffer: ResidualBuffer,
    stats: PumpStats,
}

impl Intake {
    pub(crate) fn new(config: PumpConfig) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::with_config(config.segmenter)?,
            end_of_stream: config.end_of_stream,
            buffer: ResidualBuffer::new(),
            stats: PumpStats::new(),
        })
    }

    /// Append a delta and pass every unit it completes to `emit`
    pub(crate) fn push<F>(&mut self, delta: &str, mut emit: F) -> Result<usize>
    where
        F: FnMut(RenderableUnit) -> Result<()>,
    {
        self.stats.record_delta(delta.len());
        self.buffer.push(delta);

        let mut emitted = 0;
        while let Some((unit, consumed)) = self.buffer.take_unit(&self.segmenter) {
            self.stats.record_unit(consumed);
            let kind = unit.kind();
            if let Err(err) = emit(unit) {
                log::warn!("sink rejected {} unit: {}", kind, err);
                return Err(err);
            }
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Apply the end-of-stream policy to what is left
    pub(crate) fn end<F>(&mut self, mut emit: F) -> Result<()>
    where
        F: FnMut(RenderableUnit) -> Result<()>,
    {
        let (unit, bytes) = self.buffer.take_remainder(self.end_of_stream);
        self.stats.record_end(unit.is_some(), bytes);
        match unit {
            Some(unit) => {
                log::debug!("flushing {} byte remainder", bytes);
                emit(unit)
            }
            None => {
                if bytes > 0 {
                    log::warn!("dropped {} bytes left at end of stream", bytes);
                }
                Ok(())
            }
        }
    }

    /// Drop the residual without emitting anything
    pub(crate) fn cancel(&mut self) {
        let dropped = self.buffer.clear();
        self.stats.record_end(false, dropped);
        if dropped > 0 {
            log::debug!("cancelled with {} bytes pending", dropped);
        }
    }

    pub(crate) fn residual(&self) -> &str {
        self.buffer.as_str()
    }

    pub(crate) fn stats(&self) -> &PumpStats {
        &self.stats
    }

    pub(crate) fn into_stats(self) -> PumpStats {
        self.stats
    }

    pub(crate) fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }
}

/// Turns a stream of text deltas into renderable units, inline
///
/// # Example
///
/// ```
/// use mdblock_engine::{RenderableUnit, StreamPump};
///
/// let mut units: Vec<RenderableUnit> = Vec::new();
/// let mut pump = StreamPump::new(&mut units);
/// pump.append("Hello ").unwrap();
/// pump.append("world.\n\nmore").unwrap();
/// let stats = pump.finish().unwrap();
///
/// assert_eq!(units.len(), 2);
/// assert_eq!(units[0].text(), "Hello world.\n\n");
/// assert_eq!(units[1].text(), "more");
/// assert!(stats.flushed);
/// ```
#[derive(Debug)]
pub struct StreamPump<S> {
    intake: Intake,
    sink: S,
}

impl<S: UnitSink> StreamPump<S> {
    /// Create a pump with the default configuration
    pub fn new(sink: S) -> Self {
        Self {
            intake: Intake {
                segmenter: Segmenter::default(),
                end_of_stream: EndOfStream::default(),
                buffer: ResidualBuffer::new(),
                stats: PumpStats::new(),
            },
            sink,
        }
    }

    /// Create a pump with a custom configuration
    pub fn with_config(config: PumpConfig, sink: S) -> Result<Self> {
        Ok(Self {
            intake: Intake::new(config)?,
            sink,
        })
    }

    /// Feed one delta; returns the number of units delivered
    ///
    /// A sink error is returned as is and the pump should not be used
    /// further; the unit that failed is not retried.
    pub fn append(&mut self, delta: &str) -> Result<usize> {
        let sink = &mut self.sink;
        self.intake.push(delta, |unit| sink.accept(unit))
    }

    /// Feed every delta from `deltas`, then finish the stream
    pub fn run<I, T>(mut self, deltas: I) -> Result<PumpStats>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for delta in deltas {
            self.append(delta.as_ref())?;
        }
        self.finish()
    }

    /// End the stream: apply the end-of-stream policy and close the sink
    pub fn finish(mut self) -> Result<PumpStats> {
        let sink = &mut self.sink;
        self.intake.end(|unit| sink.accept(unit))?;
        self.sink.close()?;
        Ok(self.intake.into_stats())
    }

    /// Abort the stream: the residual is discarded and the sink is not closed
    pub fn cancel(mut self) -> PumpStats {
        self.intake.cancel();
        self.intake.into_stats()
    }

    /// Text received but not yet emitted
    pub fn residual(&self) -> &str {
        self.intake.residual()
    }

    /// Counters so far
    pub fn stats(&self) -> &PumpStats {
        self.intake.stats()
    }

    /// Segmenter in use
    pub fn segmenter(&self) -> &Segmenter {
        self.intake.segmenter()
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Borrow the sink mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
