//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// An input pattern matched no file
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Malformed stream transcript
    StreamError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(pattern) => write!(f, "No files found matching: {pattern}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::StreamError(msg) => write!(f, "Stream error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("*.md".to_string()).to_string(),
            "No files found matching: *.md"
        );
        assert_eq!(
            CliError::InvalidPattern("[bad".to_string()).to_string(),
            "Invalid file pattern: [bad"
        );
        assert_eq!(
            CliError::ConfigError("delta_chars must be positive".to_string()).to_string(),
            "Configuration error: delta_chars must be positive"
        );
        assert_eq!(
            CliError::StreamError("snapshot diverged".to_string()).to_string(),
            "Stream error: snapshot diverged"
        );
    }

    #[test]
    fn test_error_converts_into_anyhow() {
        let result: anyhow::Result<()> = Err(CliError::StreamError("x".to_string()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
