//! Generate config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Commented configuration holding the built-in defaults
const TEMPLATE: &str = r#"# mdblock configuration
#
# Command-line flags override every value here.

[segmenter]
# When a closed $$ ... $$ pair becomes a unit:
#   "any-pair"   as soon as the closing $$ arrives
#   "standalone" only when the block sits on its own line
display_math = "any-pair"

# Rule evaluation order; the first rule that matches wins.
# With the default order a blank line always ends a paragraph before
# the table rule is consulted.
rules = ["paragraph", "image", "display-math", "inline-math", "table"]

[stream]
# "text" replays each file in fixed-size deltas,
# "sse" reads a server-sent-events transcript of cumulative snapshots
source = "text"

# Characters per delta for "text" sources
delta_chars = 4

# Leftover text when a stream ends: "flush" or "discard"
end_of_stream = "flush"

# Render on a worker thread behind an unbounded queue
queued = false

# Per-character delay for plain-text units, in milliseconds
pace_ms = 0

[output]
# "text", "json" or "markdown"
format = "text"

# Rewrite $x$ spans as $$x$$
normalize_math = false

# Pretty print JSON output
pretty_json = true
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!();
        println!("Use it with:");
        println!(
            "   mdblock segment -i answer.md --config {}",
            self.output.display()
        );

        Ok(())
    }
}
