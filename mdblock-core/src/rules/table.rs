//! Pipe table rule

use super::{BlockRule, MatchCandidate, RuleKind, RuleOutcome};

const SEPARATOR_ROW: &str = "\n---";
const BLANK_LINE: &str = "\n\n";

/// Emits a table once a blank line follows its dash separator row
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRule;

impl BlockRule for TableRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Table
    }

    fn evaluate(&self, text: &str) -> RuleOutcome {
        if !text.contains('|') {
            return RuleOutcome::NoMatch;
        }
        let Some(separator) = text.find(SEPARATOR_ROW) else {
            return RuleOutcome::NoMatch;
        };

        match text[separator..].find(BLANK_LINE) {
            Some(rel) => RuleOutcome::Matched(MatchCandidate::new(
                RuleKind::Table,
                0,
                separator + rel + BLANK_LINE.len(),
            )),
            None => RuleOutcome::NoMatch,
        }
    }
}
