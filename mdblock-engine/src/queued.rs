//! Queued stream pump
//!
//! Segmentation runs on the caller's thread; extracted units go through an
//! unbounded FIFO to a worker thread that owns the sink. A slow sink never
//! holds up delta ingestion. The queue has no capacity bound, so memory grows
//! if the source outpaces the sink.

use crate::config::PumpConfig;
use crate::error::{EngineError, Result};
use crate::pump::Intake;
use crate::sink::UnitSink;
use crate::state::PumpStats;
use crossbeam_channel as chan;
use mdblock_core::RenderableUnit;
use std::thread::{self, JoinHandle};

const WORKER_NAME: &str = "mdblock-render";

/// The sink handed back by a finished or cancelled [`QueuedPump`]
#[derive(Debug)]
pub struct Finished<S> {
    /// The sink, after every queued unit was delivered
    pub sink: S,
    /// Counters for the stream
    pub stats: PumpStats,
}

/// Stream pump with a render worker thread
#[derive(Debug)]
pub struct QueuedPump<S> {
    intake: Intake,
    queue: Option<chan::Sender<RenderableUnit>>,
    worker: Option<JoinHandle<Result<S>>>,
}

impl<S: UnitSink + Send + 'static> QueuedPump<S> {
    /// Start the worker thread and return the pump feeding it
    pub fn spawn(config: PumpConfig, sink: S) -> Result<Self> {
        let intake = Intake::new(config)?;
        let (tx, rx) = chan::unbounded();
        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || drain(sink, rx))?;

        Ok(Self {
            intake,
            queue: Some(tx),
            worker: Some(worker),
        })
    }

    /// Feed one delta; returns the number of units queued
    ///
    /// If the worker has stopped because the sink failed, that error is
    /// returned here.
    pub fn append(&mut self, delta: &str) -> Result<usize> {
        let queue = self.queue.as_ref().ok_or(EngineError::QueueClosed)?;
        match self.intake.push(delta, |unit| enqueue(queue, unit)) {
            Err(EngineError::QueueClosed) => Err(self.worker_failure()),
            other => other,
        }
    }

    /// Units queued but not yet taken by the worker
    pub fn pending(&self) -> usize {
        self.queue.as_ref().map_or(0, |queue| queue.len())
    }

    /// Text received but not yet segmented into a unit
    pub fn residual(&self) -> &str {
        self.intake.residual()
    }

    /// Counters so far
    pub fn stats(&self) -> &PumpStats {
        self.intake.stats()
    }

    /// End the stream and wait for the worker
    ///
    /// The end-of-stream policy is applied, every queued unit is delivered
    /// and the sink is closed.
    pub fn finish(mut self) -> Result<Finished<S>> {
        let queue = self.queue.as_ref().ok_or(EngineError::QueueClosed)?;
        if let Err(err) = self.intake.end(|unit| enqueue(queue, unit)) {
            return Err(match err {
                EngineError::QueueClosed => self.worker_failure(),
                other => other,
            });
        }

        let mut sink = self.join()?;
        sink.close()?;
        Ok(Finished {
            sink,
            stats: self.intake.into_stats(),
        })
    }

    /// Abort the stream
    ///
    /// The residual is discarded; units already queued are still delivered
    /// before the worker stops. The sink is not closed.
    pub fn cancel(mut self) -> Result<Finished<S>> {
        self.intake.cancel();
        let sink = self.join()?;
        Ok(Finished {
            sink,
            stats: self.intake.into_stats(),
        })
    }

    /// Close the queue and wait for the worker to drain it
    fn join(&mut self) -> Result<S> {
        self.queue = None;
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| EngineError::WorkerPanicked)?,
            None => Err(EngineError::QueueClosed),
        }
    }

    /// The reason the worker stopped taking units
    fn worker_failure(&mut self) -> EngineError {
        match self.join() {
            Ok(_) => EngineError::QueueClosed,
            Err(err) => err,
        }
    }
}

fn enqueue(queue: &chan::Sender<RenderableUnit>, unit: RenderableUnit) -> Result<()> {
    queue.send(unit).map_err(|_| EngineError::QueueClosed)
}

/// Worker loop: deliver units in order until the queue closes
fn drain<S: UnitSink>(mut sink: S, queue: chan::Receiver<RenderableUnit>) -> Result<S> {
    for unit in queue.iter() {
        let kind = unit.kind();
        if let Err(err) = sink.accept(unit) {
            log::warn!("render worker stopped on {} unit: {}", kind, err);
            return Err(err);
        }
    }
    log::trace!("render queue closed");
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::FnSink;
    use mdblock_core::UnitKind;

    #[test]
    fn test_units_arrive_in_order() {
        let mut pump =
            QueuedPump::spawn(PumpConfig::default(), Vec::<RenderableUnit>::new()).unwrap();
        pump.append("first\n\nsec").unwrap();
        pump.append("ond\n\nthird").unwrap();
        let finished = pump.finish().unwrap();

        let texts: Vec<_> = finished.sink.iter().map(|u| u.text()).collect();
        assert_eq!(texts, ["first\n\n", "second\n\n", "third"]);
        assert_eq!(finished.stats.units_emitted, 3);
        assert!(finished.stats.flushed);
    }

    #[test]
    fn test_cancel_keeps_queued_units() {
        let mut pump =
            QueuedPump::spawn(PumpConfig::default(), Vec::<RenderableUnit>::new()).unwrap();
        pump.append("done.\n\nhalf").unwrap();
        assert_eq!(pump.residual(), "half");

        let finished = pump.cancel().unwrap();
        assert_eq!(finished.sink.len(), 1);
        assert_eq!(finished.sink[0].kind(), UnitKind::Paragraph);
        assert_eq!(finished.stats.bytes_dropped, 4);
    }

    #[test]
    fn test_sink_failure_reaches_finish() {
        let sink = FnSink(|_unit: RenderableUnit| Err(EngineError::sink("closed window")));
        let mut pump = QueuedPump::spawn(PumpConfig::default(), sink).unwrap();
        // The worker may not have failed yet, so this can still succeed
        let _ = pump.append("a\n\n");

        match pump.finish() {
            Err(EngineError::Sink(reason)) => assert_eq!(reason, "closed window"),
            other => panic!("expected sink error, got {:?}", other.map(|f| f.stats)),
        }
    }
}
