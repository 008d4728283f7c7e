//! Output formatting module

use anyhow::Result;
use mdblock_core::RenderableUnit;
use mdblock_engine::{EngineError, UnitSink};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Format and output a single unit
    fn format_unit(&mut self, unit: &RenderableUnit) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Units separated by blank lines
    Text,
    /// JSON array of units with metadata
    Json,
    /// Units verbatim followed by a summary
    Markdown,
}

impl OutputFormat {
    /// Every format with a one-line description
    pub const ALL: [(OutputFormat, &'static str); 3] = [
        (OutputFormat::Text, "Units separated by blank lines"),
        (OutputFormat::Json, "JSON array of units with kind, length and flags"),
        (OutputFormat::Markdown, "Units verbatim with a summary footer"),
    ];

    /// Name used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// Create the formatter writing to `writer`
    pub fn formatter<W>(self, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}

/// Feeds units from a pump into a formatter
///
/// One sink spans every input stream of a run; [`FormatterSink::finish`]
/// finalizes the output once all streams are done.
pub struct FormatterSink {
    formatter: Box<dyn OutputFormatter>,
    normalize_math: bool,
    units: usize,
}

impl FormatterSink {
    /// Wrap a formatter
    pub fn new(formatter: Box<dyn OutputFormatter>, normalize_math: bool) -> Self {
        Self {
            formatter,
            normalize_math,
            units: 0,
        }
    }

    /// Units written so far
    pub fn units(&self) -> usize {
        self.units
    }

    /// Finalize the output
    pub fn finish(mut self) -> Result<usize> {
        self.formatter.finish()?;
        Ok(self.units)
    }
}

impl UnitSink for FormatterSink {
    fn accept(&mut self, unit: RenderableUnit) -> mdblock_engine::Result<()> {
        let unit = if self.normalize_math {
            RenderableUnit::new(unit.kind(), unit.normalized_math())
        } else {
            unit
        };
        self.formatter
            .format_unit(&unit)
            .map_err(|e| EngineError::sink(format!("{e:#}")))?;
        self.units += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdblock_core::UnitKind;
    use std::sync::{Arc, Mutex};

    /// Writer whose contents survive the formatter
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(pub(crate) Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_normalizes_math() {
        let buf = SharedBuf::default();
        let formatter = OutputFormat::Text.formatter(buf.clone(), false);
        let mut sink = FormatterSink::new(formatter, true);

        sink.accept(RenderableUnit::new(UnitKind::InlineMath, "So $x$ holds.\n"))
            .unwrap();
        assert_eq!(sink.finish().unwrap(), 1);
        assert_eq!(buf.contents(), "So $$x$$ holds.\n\n");
    }

    #[test]
    fn test_format_names() {
        for (format, _) in OutputFormat::ALL {
            let parsed = <OutputFormat as clap::ValueEnum>::from_str(format.name(), false).unwrap();
            assert_eq!(parsed, format);
        }
    }
}
