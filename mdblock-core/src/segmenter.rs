//! Online block segmentation over a growing text buffer

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::rules::RuleTable;
use crate::unit::{RenderableUnit, UnitKind};

/// A unit taken from the front of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The complete block
    pub unit: RenderableUnit,
    /// Bytes to remove from the front of the buffer, leading whitespace included
    pub consumed: usize,
}

/// Decides whether the buffered text starts with one complete block
///
/// The segmenter holds no stream state: the caller passes the whole residual
/// buffer on every call and removes `consumed` bytes after each extraction.
#[derive(Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    rules: RuleTable,
}

impl Segmenter {
    /// Create a segmenter with the default rule order and policy
    pub fn new() -> Result<Self> {
        Self::with_config(SegmenterConfig::default())
    }

    /// Create a segmenter from a configuration
    pub fn with_config(config: SegmenterConfig) -> Result<Self> {
        let rules = RuleTable::from_config(&config)?;
        Ok(Self { config, rules })
    }

    /// Active configuration
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Rule table in evaluation order
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Extract the first complete unit, or `None` if more input is needed
    ///
    /// Leading whitespace is skipped before matching and counted in
    /// `consumed`. When an image or display math block is found after some
    /// prose, the prose is returned first as a [`UnitKind::Prose`] unit; the
    /// block follows on the next call.
    pub fn segment(&self, text: &str) -> Option<Extraction> {
        let view = text.trim_start();
        if view.is_empty() {
            return None;
        }
        let lead = text.len() - view.len();

        let candidate = self.rules.evaluate(view)?;
        let extraction = if candidate.start > 0 {
            Extraction {
                unit: RenderableUnit::new(UnitKind::Prose, &view[..candidate.start]),
                consumed: lead + candidate.start,
            }
        } else {
            Extraction {
                unit: RenderableUnit::new(candidate.kind.into(), &view[..candidate.end]),
                consumed: lead + candidate.consumed,
            }
        };

        debug_assert!(extraction.consumed > 0 && extraction.consumed <= text.len());
        log::debug!(
            "extracted {} unit ({} bytes consumed of {})",
            extraction.unit.kind(),
            extraction.consumed,
            text.len()
        );

        Some(extraction)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new().expect("default segmenter creation should not fail")
    }
}

/// Unit for text still buffered when the stream ends
///
/// Returns `None` if only whitespace is left.
pub fn remainder_unit(text: &str) -> Option<RenderableUnit> {
    let rest = text.trim_start();
    if rest.is_empty() {
        None
    } else {
        Some(RenderableUnit::new(UnitKind::Remainder, rest))
    }
}
