//! Sentence terminator lookup with O(1) checks
//!
//! Optimized for the inline-math hot path with an ASCII fast-path.

use std::collections::HashSet;

/// Terminators that may close a sentence after inline math
pub const SENTENCE_TERMINATORS: [char; 4] = ['.', '。', '！', '？'];

/// Fast terminator lookup table
#[derive(Debug, Clone)]
pub struct TermTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [bool; 128],
    /// HashSet for non-ASCII terminators (CJK punctuation)
    non_ascii: HashSet<char>,
}

impl TermTable {
    /// Create from a list of terminator characters
    pub fn new(terminators: impl IntoIterator<Item = char>) -> Self {
        let mut ascii_table = [false; 128];
        let mut non_ascii = HashSet::new();

        for ch in terminators {
            if ch.is_ascii() {
                ascii_table[ch as usize] = true;
            } else {
                non_ascii.insert(ch);
            }
        }

        Self {
            ascii_table,
            non_ascii,
        }
    }

    /// Table holding the fixed sentence terminator set
    pub fn sentence() -> Self {
        Self::new(SENTENCE_TERMINATORS)
    }

    /// Check if character is a terminator - hot path
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii_table[ch as usize]
        } else {
            self.non_ascii.contains(&ch)
        }
    }
}

impl Default for TermTable {
    fn default() -> Self {
        Self::sentence()
    }
}
