//! Paragraph break rule

use super::{BlockRule, MatchCandidate, RuleKind, RuleOutcome};

const PARAGRAPH_BREAK: &str = "\n\n";

/// Emits everything up to and including the first blank line
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphRule;

impl BlockRule for ParagraphRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Paragraph
    }

    fn evaluate(&self, text: &str) -> RuleOutcome {
        match text.find(PARAGRAPH_BREAK) {
            Some(idx) => RuleOutcome::Matched(MatchCandidate::new(
                RuleKind::Paragraph,
                0,
                idx + PARAGRAPH_BREAK.len(),
            )),
            None => RuleOutcome::NoMatch,
        }
    }
}
