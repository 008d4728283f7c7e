//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use mdblock_core::RuleKind;
use std::io::{self, Write};

/// What each rule accepts
fn rule_summary(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Paragraph => "text up to and including the first blank line",
        RuleKind::Image => "a complete ![alt](url) reference",
        RuleKind::DisplayMath => "a closed $$ ... $$ block; an open $$ waits for more input",
        RuleKind::InlineMath => "a sentence containing $...$ through the end of its line",
        RuleKind::Table => "rows with a --- separator, closed by a blank line",
    }
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    fn write_to(&self, out: &mut impl Write) -> Result<()> {
        match self {
            ListCommands::Rules => {
                writeln!(out, "Rules in default evaluation order:")?;
                for (position, kind) in RuleKind::DEFAULT_ORDER.iter().enumerate() {
                    writeln!(
                        out,
                        "  {}. {:<12} {}",
                        position + 1,
                        kind.name(),
                        rule_summary(*kind)
                    )?;
                }
            }
            ListCommands::Formats => {
                writeln!(out, "Output formats:")?;
                for (format, summary) in OutputFormat::ALL {
                    writeln!(out, "  {:<9} {}", format.name(), summary)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(command: ListCommands) -> String {
        let mut out = Vec::new();
        command.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_rules() {
        let listing = render(ListCommands::Rules);
        assert!(listing.contains("1. paragraph"));
        assert!(listing.contains("5. table"));
        assert!(listing.find("image").unwrap() < listing.find("display-math").unwrap());
    }

    #[test]
    fn test_list_formats() {
        let listing = render(ListCommands::Formats);
        for name in ["text", "json", "markdown"] {
            assert!(listing.contains(name));
        }
    }
}
