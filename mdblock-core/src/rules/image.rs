//! Image reference rule

use super::{BlockRule, MatchCandidate, RuleKind, RuleOutcome};
use crate::error::Result;
use regex::Regex;

/// Shortest `![alt](url)` on a single line
const IMAGE_PATTERN: &str = r"!\[.*?\]\(.*?\)";

/// Matches the first complete image reference
#[derive(Debug, Clone)]
pub struct ImageRule {
    pattern: Regex,
}

impl ImageRule {
    /// Compile the image pattern
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(IMAGE_PATTERN)?,
        })
    }
}

impl BlockRule for ImageRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Image
    }

    fn evaluate(&self, text: &str) -> RuleOutcome {
        match self.pattern.find(text) {
            Some(m) => {
                RuleOutcome::Matched(MatchCandidate::new(RuleKind::Image, m.start(), m.end()))
            }
            None => RuleOutcome::NoMatch,
        }
    }
}
