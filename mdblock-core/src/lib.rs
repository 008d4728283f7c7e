//! Incremental block segmentation for streamed markdown
//!
//! Language models emit markdown a few characters at a time. A renderer wants
//! whole blocks: a finished paragraph, a complete image reference, a closed
//! math expression, a table with all its rows. This crate decides, given all
//! text received so far, whether the front of the buffer forms one complete
//! block.
//!
//! # Rules
//!
//! Rules are evaluated in priority order and the first one that applies wins:
//!
//! 1. **Paragraph** - text through the first blank line (`\n\n`)
//! 2. **Image** - the shortest `![alt](url)`
//! 3. **Display math** - `$$ ... $$`; an unclosed `$$` stops evaluation
//! 4. **Inline math** - a sentence holding `$...$`, through its newline
//! 5. **Table** - a pipe table whose `---` row is followed by a blank line
//!
//! # Example
//!
//! ```rust
//! use mdblock_core::{Segmenter, UnitKind};
//!
//! let segmenter = Segmenter::new().unwrap();
//!
//! let extraction = segmenter.segment("Hello world.\n\nmore").unwrap();
//! assert_eq!(extraction.unit.kind(), UnitKind::Paragraph);
//! assert_eq!(extraction.unit.text(), "Hello world.\n\n");
//! assert_eq!(extraction.consumed, 14);
//!
//! // An open display block waits for its closing pair
//! assert!(segmenter.segment("$$x = 1").is_none());
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod segmenter;
pub mod unit;

pub use config::{DisplayMathPolicy, SegmenterConfig, SegmenterConfigBuilder};
pub use error::{CoreError, Result};
pub use rules::{BlockRule, MatchCandidate, RuleKind, RuleOutcome, RuleTable};
pub use segmenter::{remainder_unit, Extraction, Segmenter};
pub use unit::{normalize_inline_math, RenderableUnit, UnitKind};
