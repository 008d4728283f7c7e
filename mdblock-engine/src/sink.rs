//! Destinations for extracted units

use crate::error::{EngineError, Result};
use crossbeam_channel::Sender;
use mdblock_core::RenderableUnit;
use std::thread;
use std::time::Duration;

/// Receives units in stream order
///
/// An error stops the pump that owns the sink; the unit that failed is not
/// retried.
pub trait UnitSink {
    /// Handle one unit
    fn accept(&mut self, unit: RenderableUnit) -> Result<()>;

    /// Called once after the last unit of a finished stream
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl UnitSink for Vec<RenderableUnit> {
    fn accept(&mut self, unit: RenderableUnit) -> Result<()> {
        self.push(unit);
        Ok(())
    }
}

impl<S: UnitSink + ?Sized> UnitSink for &mut S {
    fn accept(&mut self, unit: RenderableUnit) -> Result<()> {
        (**self).accept(unit)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<S: UnitSink + ?Sized> UnitSink for Box<S> {
    fn accept(&mut self, unit: RenderableUnit) -> Result<()> {
        (**self).accept(unit)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Forwards units to another thread; fails once the receiver is gone
impl UnitSink for Sender<RenderableUnit> {
    fn accept(&mut self, unit: RenderableUnit) -> Result<()> {
        self.send(unit).map_err(|_| EngineError::QueueClosed)
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F> UnitSink for FnSink<F>
where
    F: FnMut(RenderableUnit) -> Result<()>,
{
    fn accept(&mut self, unit: RenderableUnit) -> Result<()> {
        (self.0)(unit)
    }
}

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnSink")
    }
}

/// Delays each plain-text unit by a fixed time per character before
/// passing it on, to imitate typing
///
/// Units with math (inline or display), images or tables pass through at
/// once.
#[derive(Debug)]
pub struct PacedSink<S> {
    inner: S,
    per_char: Duration,
}

impl<S: UnitSink> PacedSink<S> {
    /// Default delay per character
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(20);

    /// Wrap `inner` with the given per-character delay
    pub fn new(inner: S, per_char: Duration) -> Self {
        Self { inner, per_char }
    }

    /// Borrow the inner sink
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the inner sink
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn delay_for(&self, unit: &RenderableUnit) -> Duration {
        if !unit.is_plain_text() || self.per_char.is_zero() {
            return Duration::ZERO;
        }
        let chars = u32::try_from(unit.text().chars().count()).unwrap_or(u32::MAX);
        self.per_char.saturating_mul(chars)
    }
}

impl<S: UnitSink> UnitSink for PacedSink<S> {
    fn accept(&mut self, unit: RenderableUnit) -> Result<()> {
        let delay = self.delay_for(&unit);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        self.inner.accept(unit)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}
