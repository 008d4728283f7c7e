//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use mdblock_core::{RenderableUnit, UnitKind};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs units as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    units: Vec<UnitData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UnitData {
    /// Position in the output, counted across all inputs
    pub index: usize,
    /// Block kind
    pub kind: UnitKind,
    /// The unit text
    pub text: String,
    /// Length of the text in bytes
    pub length: usize,
    /// Whether the unit can be shown as plain text
    pub plain: bool,
    /// Whether the unit is display math, laid out centered
    pub display: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            units: Vec::new(),
        }
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_unit(&mut self, unit: &RenderableUnit) -> Result<()> {
        self.units.push(UnitData {
            index: self.units.len(),
            kind: unit.kind(),
            text: unit.text().to_string(),
            length: unit.len(),
            plain: unit.is_plain_text(),
            display: unit.is_display_math(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.units)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.units)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let mut out = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut out, false);
            formatter
                .format_unit(&RenderableUnit::new(UnitKind::Paragraph, "Hi.\n\n"))
                .unwrap();
            formatter
                .format_unit(&RenderableUnit::new(UnitKind::DisplayMath, "$$x$$"))
                .unwrap();
            formatter.finish().unwrap();
        }

        let units: Vec<UnitData> = serde_json::from_slice(&out).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].index, 1);
        assert_eq!(units[1].kind, UnitKind::DisplayMath);
        assert_eq!(units[0].length, 5);
        assert!(units[0].plain);
        assert!(!units[1].plain);
        assert!(!units[0].display);
        assert!(units[1].display);

        let raw = String::from_utf8(out).unwrap();
        assert!(raw.contains("\"kind\":\"display-math\""));
    }

    #[test]
    fn test_inline_math_is_not_plain() {
        let mut out = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut out, false);
            formatter
                .format_unit(&RenderableUnit::new(UnitKind::InlineMath, "Cost $x$ here.\n"))
                .unwrap();
            formatter.finish().unwrap();
        }

        let units: Vec<UnitData> = serde_json::from_slice(&out).unwrap();
        assert!(!units[0].plain);
        assert!(!units[0].display);
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let mut out = Vec::new();
        JsonFormatter::new(&mut out, true).finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
