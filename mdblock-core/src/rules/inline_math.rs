//! Inline math closed by the end of its sentence
//!
//! Inline math is usually followed by prose on the same line, so the unit
//! only completes once that line ends. The accepted shape is:
//!
//! ```text
//! $<math>$ <non-terminators>* <terminator>? <whitespace>* \n
//! ```
//!
//! The opening `$` must not follow another `$`, the closing `$` must not be
//! followed by one, and the math itself is the shortest non-empty run on a
//! single line. Trailing whitespace extends to the last newline of the run.

use super::{BlockRule, MatchCandidate, RuleKind, RuleOutcome, TermTable};

/// Matches a sentence containing inline math, through its line break
#[derive(Debug, Clone)]
pub struct InlineMathRule {
    terminators: TermTable,
}

impl InlineMathRule {
    /// Create the rule with the fixed terminator set
    pub fn new() -> Self {
        Self {
            terminators: TermTable::sentence(),
        }
    }

    /// Byte range of the first match, if any
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        let bytes = text.as_bytes();

        for (open, _) in text.match_indices('$') {
            if open > 0 && bytes[open - 1] == b'$' {
                continue;
            }

            let body_start = open + 1;
            let line_end = text[body_start..]
                .find('\n')
                .map_or(text.len(), |i| body_start + i);

            // The math body needs at least one char, so the closing `$`
            // cannot sit directly after the opening one.
            for (rel, _) in text[body_start..line_end].match_indices('$') {
                let close = body_start + rel;
                if close == body_start || bytes.get(close + 1) == Some(&b'$') {
                    continue;
                }
                if let Some(end) = self.sentence_end(text, close + 1) {
                    return Some((open, end));
                }
            }
        }

        None
    }

    /// End of the sentence tail starting at `from`, through its last newline
    fn sentence_end(&self, text: &str, from: usize) -> Option<usize> {
        let tail = &text[from..];
        let stop = tail.find(|c: char| c == '\n' || self.terminators.is_terminator(c))?;

        let mut cursor = stop;
        if let Some(ch) = tail[stop..].chars().next() {
            if ch != '\n' {
                cursor += ch.len_utf8();
            }
        }

        let mut last_newline = None;
        for (i, ch) in tail[cursor..].char_indices() {
            if !is_pattern_space(ch) {
                break;
            }
            if ch == '\n' {
                last_newline = Some(cursor + i + 1);
            }
        }

        last_newline.map(|end| from + end)
    }
}

impl Default for InlineMathRule {
    fn default() -> Self {
        Self::new()
    }
}

/// ASCII whitespace including vertical tab
fn is_pattern_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

impl BlockRule for InlineMathRule {
    fn kind(&self) -> RuleKind {
        RuleKind::InlineMath
    }

    fn evaluate(&self, text: &str) -> RuleOutcome {
        match self.find(text) {
            // The sentence around the math is part of the unit.
            Some((_, end)) => {
                RuleOutcome::Matched(MatchCandidate::new(RuleKind::InlineMath, 0, end))
            }
            None => RuleOutcome::NoMatch,
        }
    }
}
