//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use mdblock_core::RenderableUnit;
use std::io::Write;

/// Plain text formatter - outputs each unit followed by a blank line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_unit(&mut self, unit: &RenderableUnit) -> Result<()> {
        writeln!(self.writer, "{}", unit.text().trim_end())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
