//! Core error types (deterministic only)
//!
//! "Not yet decidable" is never an error: the segmenter reports it as `None`.
//! These errors only arise while building a segmenter from configuration.

use thiserror::Error;

/// Errors raised while configuring the segmenter
#[derive(Error, Debug)]
pub enum CoreError {
    /// The rule table has no rules to evaluate
    #[error("rule table is empty")]
    EmptyRuleTable,

    /// The same rule appears more than once in the evaluation order
    #[error("rule '{0}' appears more than once in the rule order")]
    DuplicateRule(String),

    /// A policy or rule name could not be parsed
    #[error("unknown {what} '{value}'")]
    UnknownName {
        /// What kind of name was being parsed
        what: &'static str,
        /// The rejected input
        value: String,
    },

    /// A built-in pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// TOML configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(CoreError::EmptyRuleTable.to_string(), "rule table is empty");
        assert_eq!(
            CoreError::DuplicateRule("image".to_string()).to_string(),
            "rule 'image' appears more than once in the rule order"
        );

        let err = CoreError::UnknownName {
            what: "display math policy",
            value: "sometimes".to_string(),
        };
        assert_eq!(err.to_string(), "unknown display math policy 'sometimes'");
    }
}
