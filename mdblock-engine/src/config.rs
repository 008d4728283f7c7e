//! Pump configuration

use crate::error::{EngineError, Result};
use mdblock_core::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to buffered text when the stream ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfStream {
    /// Emit non-blank leftover text as one final remainder unit
    #[default]
    Flush,
    /// Drop leftover text silently
    Discard,
}

impl EndOfStream {
    /// Stable name used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            EndOfStream::Flush => "flush",
            EndOfStream::Discard => "discard",
        }
    }
}

impl fmt::Display for EndOfStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EndOfStream {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flush" => Ok(EndOfStream::Flush),
            "discard" => Ok(EndOfStream::Discard),
            other => Err(EngineError::ConfigError(format!(
                "unknown end-of-stream policy '{other}'"
            ))),
        }
    }
}

/// Configuration shared by both pump architectures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpConfig {
    /// Segmentation rules and policies
    pub segmenter: SegmenterConfig,
    /// Stream-end policy for leftover text
    pub end_of_stream: EndOfStream,
}

impl PumpConfig {
    /// Configuration that drops leftover text at stream end
    pub fn discarding() -> Self {
        Self {
            end_of_stream: EndOfStream::Discard,
            ..Self::default()
        }
    }
}
