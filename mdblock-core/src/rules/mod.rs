//! Block rules and the priority-ordered rule table
//!
//! Every rule looks at the whitespace-trimmed view of the residual buffer and
//! answers with a [`RuleOutcome`]. The table evaluates rules top to bottom;
//! the first rule that matches or holds decides the outcome.

pub mod display_math;
pub mod image;
pub mod inline_math;
pub mod paragraph;
pub mod table;
pub mod terminator;

use crate::config::SegmenterConfig;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use display_math::DisplayMathRule;
pub use image::ImageRule;
pub use inline_math::InlineMathRule;
pub use paragraph::ParagraphRule;
pub use table::TableRule;
pub use terminator::TermTable;

/// Identifies one of the fixed block patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Two consecutive newlines
    Paragraph,
    /// `![alt](url)`
    Image,
    /// `$$ ... $$`
    DisplayMath,
    /// `$...$` followed by the rest of its sentence and a newline
    InlineMath,
    /// Pipe table with a dash separator row, closed by a blank line
    Table,
}

impl RuleKind {
    /// All rules in their default evaluation order
    pub const DEFAULT_ORDER: [RuleKind; 5] = [
        RuleKind::Paragraph,
        RuleKind::Image,
        RuleKind::DisplayMath,
        RuleKind::InlineMath,
        RuleKind::Table,
    ];

    /// Stable name used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Paragraph => "paragraph",
            RuleKind::Image => "image",
            RuleKind::DisplayMath => "display-math",
            RuleKind::InlineMath => "inline-math",
            RuleKind::Table => "table",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        RuleKind::DEFAULT_ORDER
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CoreError::UnknownName {
                what: "rule",
                value: s.to_string(),
            })
    }
}

/// A located match, relative to the trimmed view it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Rule that produced the match
    pub kind: RuleKind,
    /// Byte offset where the unit starts
    pub start: usize,
    /// Byte offset one past the last byte of the unit
    pub end: usize,
    /// Bytes of the view consumed when the unit is extracted
    pub consumed: usize,
}

impl MatchCandidate {
    /// Candidate whose unit spans from `start` to `end` and consumes through `end`
    pub fn new(kind: RuleKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            consumed: end,
        }
    }
}

/// Result of evaluating a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule found a complete unit
    Matched(MatchCandidate),
    /// The rule saw an unfinished construct; stop and wait for more input
    Hold,
    /// The rule does not apply; try the next one
    NoMatch,
}

/// A single block pattern
pub trait BlockRule: fmt::Debug + Send + Sync {
    /// Which pattern this rule recognizes
    fn kind(&self) -> RuleKind;

    /// Evaluate the rule against whitespace-trimmed text
    ///
    /// Must be deterministic and free of side effects.
    fn evaluate(&self, text: &str) -> RuleOutcome;
}

/// One row of the rule table
#[derive(Debug)]
pub struct RuleEntry {
    /// Lower values are evaluated first
    pub priority: usize,
    /// The matcher
    pub rule: Box<dyn BlockRule>,
}

impl RuleEntry {
    /// Kind of the wrapped rule
    pub fn kind(&self) -> RuleKind {
        self.rule.kind()
    }
}

/// Priority-ordered set of block rules
#[derive(Debug)]
pub struct RuleTable {
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    /// Build the table described by a segmenter configuration
    pub fn from_config(config: &SegmenterConfig) -> Result<Self> {
        config.validate()?;

        let mut entries = Vec::with_capacity(config.rules.len());
        for (priority, kind) in config.rules.iter().enumerate() {
            let rule: Box<dyn BlockRule> = match kind {
                RuleKind::Paragraph => Box::new(ParagraphRule),
                RuleKind::Image => Box::new(ImageRule::new()?),
                RuleKind::DisplayMath => Box::new(DisplayMathRule::new(config.display_math)),
                RuleKind::InlineMath => Box::new(InlineMathRule::new()),
                RuleKind::Table => Box::new(TableRule),
            };
            entries.push(RuleEntry { priority, rule });
        }
        entries.sort_by_key(|entry| entry.priority);

        Ok(Self { entries })
    }

    /// Evaluate rules in priority order
    ///
    /// Returns the first match, or `None` when no rule matched or a rule
    /// asked to hold.
    pub fn evaluate(&self, text: &str) -> Option<MatchCandidate> {
        for entry in &self.entries {
            match entry.rule.evaluate(text) {
                RuleOutcome::Matched(candidate) => {
                    log::trace!(
                        "rule {} matched {}..{}",
                        entry.kind(),
                        candidate.start,
                        candidate.end
                    );
                    return Some(candidate);
                }
                RuleOutcome::Hold => {
                    log::trace!("rule {} holds for more input", entry.kind());
                    return None;
                }
                RuleOutcome::NoMatch => {}
            }
        }
        None
    }

    /// Rule kinds in evaluation order
    pub fn kinds(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.entries.iter().map(RuleEntry::kind)
    }

    /// Number of rules in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayMathPolicy;

    #[test]
    fn test_rule_kind_names_round_trip() {
        for kind in RuleKind::DEFAULT_ORDER {
            assert_eq!(kind.name().parse::<RuleKind>().unwrap(), kind);
        }
        assert!("heading".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_default_table_order() {
        let table = RuleTable::from_config(&SegmenterConfig::default()).unwrap();
        let kinds: Vec<_> = table.kinds().collect();
        assert_eq!(kinds, RuleKind::DEFAULT_ORDER.to_vec());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_custom_order_is_respected() {
        let config = SegmenterConfig::builder()
            .rules(vec![RuleKind::Image, RuleKind::Paragraph])
            .build()
            .unwrap();
        let table = RuleTable::from_config(&config).unwrap();

        // With image first, an image after a paragraph break wins.
        let text = "intro\n\n![a](b)";
        let candidate = table.evaluate(text).unwrap();
        assert_eq!(candidate.kind, RuleKind::Image);
    }

    #[test]
    fn test_hold_stops_evaluation() {
        let config = SegmenterConfig::builder()
            .display_math(DisplayMathPolicy::AnyPair)
            .build()
            .unwrap();
        let table = RuleTable::from_config(&config).unwrap();

        // Inline math would match on its own, but the open display block holds.
        assert_eq!(
            table.evaluate("Some $y$ here.\n").map(|c| c.kind),
            Some(RuleKind::InlineMath)
        );
        assert_eq!(table.evaluate("$$x\nSome $y$ here.\n"), None);
    }
}
