//! Renderable units handed from the segmenter to a renderer

use crate::rules::RuleKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of block a unit holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    /// Text closed by a blank line
    Paragraph,
    /// A single `![alt](url)` reference
    Image,
    /// A `$$ ... $$` block
    DisplayMath,
    /// A sentence containing inline math, through its line break
    InlineMath,
    /// A pipe table closed by a blank line
    Table,
    /// Prose that preceded an image or display math block
    Prose,
    /// Whatever was left in the buffer when the stream ended
    Remainder,
}

impl UnitKind {
    /// Stable name used in serialized output
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Paragraph => "paragraph",
            UnitKind::Image => "image",
            UnitKind::DisplayMath => "display-math",
            UnitKind::InlineMath => "inline-math",
            UnitKind::Table => "table",
            UnitKind::Prose => "prose",
            UnitKind::Remainder => "remainder",
        }
    }
}

impl From<RuleKind> for UnitKind {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Paragraph => UnitKind::Paragraph,
            RuleKind::Image => UnitKind::Image,
            RuleKind::DisplayMath => UnitKind::DisplayMath,
            RuleKind::InlineMath => UnitKind::InlineMath,
            RuleKind::Table => UnitKind::Table,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One complete markup block, owned independently of the stream buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderableUnit {
    kind: UnitKind,
    text: String,
}

impl RenderableUnit {
    /// Create a unit
    pub fn new(kind: UnitKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Block kind
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Raw block text, exactly as it appeared in the stream
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the raw text
    pub fn into_text(self) -> String {
        self.text
    }

    /// Length of the raw text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the unit holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the block can be shown as plain running text
    ///
    /// Renderers type plain text out progressively and fade everything else
    /// in at once. Markers are checked after math normalization, so a lone
    /// `$x$` span makes the unit rich.
    pub fn is_plain_text(&self) -> bool {
        const RICH_MARKERS: [&str; 5] = ["$$", "![", "|", "\\begin", "<img"];
        let normalized = self.normalized_math();
        !RICH_MARKERS.iter().any(|marker| normalized.contains(marker))
    }

    /// Whether the block is display math (rendered centered)
    pub fn is_display_math(&self) -> bool {
        self.text.trim().starts_with("$$")
    }

    /// Trimmed text with isolated `$...$` rewritten as `$$...$$`
    ///
    /// For renderers whose math support only understands double dollars.
    pub fn normalized_math(&self) -> String {
        normalize_inline_math(self.text.trim())
    }
}

impl fmt::Display for RenderableUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RenderableUnit {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// A `$` with no `$` on either side
fn is_lone_dollar(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'$'
        && (idx == 0 || bytes[idx - 1] != b'$')
        && bytes.get(idx + 1) != Some(&b'$')
}

/// Rewrite isolated single-dollar math spans on each line to double dollars
pub fn normalize_inline_math(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 8);
    let mut copied = 0;
    let mut search = 0;

    while let Some(rel) = text[search..].find('$') {
        let open = search + rel;
        search = open + 1;
        if !is_lone_dollar(bytes, open) {
            continue;
        }

        let body_start = open + 1;
        let line_end = text[body_start..]
            .find('\n')
            .map_or(text.len(), |i| body_start + i);
        let close = text[body_start..line_end]
            .match_indices('$')
            .map(|(i, _)| body_start + i)
            .find(|&idx| idx > body_start && is_lone_dollar(bytes, idx));

        if let Some(close) = close {
            out.push_str(&text[copied..open]);
            out.push_str("$$");
            out.push_str(&text[body_start..close]);
            out.push_str("$$");
            copied = close + 1;
            search = close + 1;
        }
    }

    out.push_str(&text[copied..]);
    out
}
