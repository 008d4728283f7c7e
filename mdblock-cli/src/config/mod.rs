//! Configuration file handling

use crate::error::CliError;
use crate::input::SourceKind;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use mdblock_core::SegmenterConfig;
use mdblock_engine::{EndOfStream, PumpConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Segmentation rules and policies
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Stream simulation and pump settings
    #[serde(default)]
    pub stream: StreamConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Stream-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// How input files are read
    pub source: SourceKind,

    /// Characters per delta when replaying plain text
    pub delta_chars: usize,

    /// What to do with text left when the stream ends
    pub end_of_stream: EndOfStream,

    /// Render on a worker thread behind a queue
    pub queued: bool,

    /// Per-character delay for plain-text units, in milliseconds
    pub pace_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Text,
            delta_chars: 4,
            end_of_stream: EndOfStream::Flush,
            queued: false,
            pace_ms: 0,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Rewrite `$x$` spans as `$$x$$`
    pub normalize_math: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            normalize_math: false,
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&source)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.stream.delta_chars == 0 {
            return Err(
                CliError::ConfigError("delta_chars must be at least 1".to_string()).into(),
            );
        }
        self.segmenter.validate().map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(())
    }

    /// Settings handed to the stream pump
    pub fn pump_config(&self) -> PumpConfig {
        PumpConfig {
            segmenter: self.segmenter.clone(),
            end_of_stream: self.stream.end_of_stream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdblock_core::{DisplayMathPolicy, RuleKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_roundtrips_through_toml() {
        let config = CliConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mdblock.toml");
        fs::write(
            &path,
            r#"
[segmenter]
display_math = "standalone"
rules = ["paragraph", "table"]

[stream]
end_of_stream = "discard"
queued = true

[output]
format = "json"
"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.segmenter.display_math, DisplayMathPolicy::Standalone);
        assert_eq!(config.segmenter.rules, [RuleKind::Paragraph, RuleKind::Table]);
        assert_eq!(config.stream.end_of_stream, EndOfStream::Discard);
        assert_eq!(config.stream.delta_chars, 4);
        assert!(config.stream.queued);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_zero_delta_chars_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "[stream]\ndelta_chars = 0\n").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("delta_chars"));
    }

    #[test]
    fn test_duplicate_rules_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dup.toml");
        fs::write(&path, "[segmenter]\nrules = [\"image\", \"image\"]\n").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/mdblock.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
