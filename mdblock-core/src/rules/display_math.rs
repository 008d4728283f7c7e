//! Display math rule (`$$ ... $$`)
//!
//! An opening `$$` without its closing pair holds the whole table: the text
//! must not be reinterpreted by lower-priority rules while the block is still
//! arriving.

use super::{BlockRule, MatchCandidate, RuleKind, RuleOutcome};
use crate::config::DisplayMathPolicy;

const DELIMITER: &str = "$$";

/// Matches the first closed `$$ ... $$` block
#[derive(Debug, Clone, Copy)]
pub struct DisplayMathRule {
    policy: DisplayMathPolicy,
}

impl DisplayMathRule {
    /// Create the rule with the given acceptance policy
    pub fn new(policy: DisplayMathPolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect
    pub fn policy(&self) -> DisplayMathPolicy {
        self.policy
    }
}

/// Block sits on its own lines: newline or text edge on both sides
fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before_ok = start == 0 || text[..start].ends_with('\n');
    let after_ok = end == text.len() || text[end..].starts_with('\n');
    before_ok && after_ok
}

impl BlockRule for DisplayMathRule {
    fn kind(&self) -> RuleKind {
        RuleKind::DisplayMath
    }

    fn evaluate(&self, text: &str) -> RuleOutcome {
        let Some(open) = text.find(DELIMITER) else {
            return RuleOutcome::NoMatch;
        };

        let body_start = open + DELIMITER.len();
        let Some(close) = text[body_start..].find(DELIMITER) else {
            return RuleOutcome::Hold;
        };
        let end = body_start + close + DELIMITER.len();

        match self.policy {
            DisplayMathPolicy::AnyPair => {
                RuleOutcome::Matched(MatchCandidate::new(RuleKind::DisplayMath, open, end))
            }
            DisplayMathPolicy::Standalone if is_standalone(text, open, end) => {
                RuleOutcome::Matched(MatchCandidate::new(RuleKind::DisplayMath, open, end))
            }
            DisplayMathPolicy::Standalone => RuleOutcome::NoMatch,
        }
    }
}
