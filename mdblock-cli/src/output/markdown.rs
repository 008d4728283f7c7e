//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use mdblock_core::RenderableUnit;
use std::io::Write;

/// Markdown formatter - outputs units verbatim with a summary footer
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    unit_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            unit_count: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_unit(&mut self, unit: &RenderableUnit) -> Result<()> {
        self.unit_count += 1;
        let text = unit.text();
        if text.ends_with('\n') {
            write!(self.writer, "{}", text)?;
        } else {
            writeln!(self.writer, "{}", text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total units: {}*", self.unit_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
