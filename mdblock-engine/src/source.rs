//! Adapters that turn whole texts and cumulative snapshots into deltas

use crate::error::{EngineError, Result};

/// Splits a text into deltas of at most `max_chars` characters
///
/// Splits fall on char boundaries. A limit of zero is treated as one.
#[derive(Debug, Clone)]
pub struct ChunkedText<'a> {
    rest: &'a str,
    max_chars: usize,
}

impl<'a> ChunkedText<'a> {
    /// Create an iterator over `text`
    pub fn new(text: &'a str, max_chars: usize) -> Self {
        Self {
            rest: text,
            max_chars: max_chars.max(1),
        }
    }
}

impl<'a> Iterator for ChunkedText<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let split = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (chunk, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(chunk)
    }
}

/// Converts cumulative snapshots into deltas
///
/// Some streaming APIs resend the whole text generated so far with every
/// message. Each snapshot must extend the previous one; the delta is the
/// new suffix.
#[derive(Debug, Default)]
pub struct SnapshotDiffer {
    seen: String,
}

impl SnapshotDiffer {
    /// Create a differ with nothing seen
    pub fn new() -> Self {
        Self::default()
    }

    /// The delta carried by `snapshot`, or `None` if it adds nothing
    ///
    /// Blank snapshots are skipped. Whitespace-only deltas are kept since
    /// they can complete a block.
    pub fn delta(&mut self, snapshot: &str) -> Result<Option<&str>> {
        if snapshot.trim().is_empty() {
            return Ok(None);
        }
        if !snapshot.starts_with(self.seen.as_str()) {
            return Err(EngineError::SnapshotDiverged {
                seen: self.seen.len(),
                snapshot: snapshot.len(),
            });
        }

        let start = self.seen.len();
        if snapshot.len() == start {
            return Ok(None);
        }
        self.seen.push_str(&snapshot[start..]);
        Ok(Some(&self.seen[start..]))
    }

    /// All text seen so far
    pub fn text(&self) -> &str {
        &self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunked_text_respects_char_boundaries() {
        let chunks: Vec<_> = ChunkedText::new("ab日本語c", 2).collect();
        assert_eq!(chunks, ["ab", "日本", "語c"]);
    }

    #[test]
    fn test_chunked_text_zero_limit() {
        let chunks: Vec<_> = ChunkedText::new("abc", 0).collect();
        assert_eq!(chunks, ["a", "b", "c"]);
        assert_eq!(ChunkedText::new("", 4).count(), 0);
    }

    #[test]
    fn test_snapshot_deltas() {
        let mut differ = SnapshotDiffer::new();
        assert_eq!(differ.delta("Hel").unwrap(), Some("Hel"));
        assert_eq!(differ.delta("Hello").unwrap(), Some("lo"));
        assert_eq!(differ.delta("Hello").unwrap(), None);
        assert_eq!(differ.delta("Hello\n\n").unwrap(), Some("\n\n"));
        assert_eq!(differ.delta("  ").unwrap(), None);
        assert_eq!(differ.text(), "Hello\n\n");
    }

    #[test]
    fn test_snapshot_divergence() {
        let mut differ = SnapshotDiffer::new();
        differ.delta("Hello").unwrap();
        let err = differ.delta("Help").unwrap_err();
        assert!(matches!(
            err,
            EngineError::SnapshotDiverged {
                seen: 5,
                snapshot: 4
            }
        ));
    }
}
