//! Segmenter configuration
//!
//! The recognized grammar is fixed; configuration only chooses between the
//! two display-math acceptance policies and the rule evaluation order.

use crate::error::{CoreError, Result};
use crate::rules::RuleKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// When a closed `$$ ... $$` pair may be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMathPolicy {
    /// Emit as soon as a closing pair is found anywhere
    #[default]
    AnyPair,
    /// Emit only when the block sits on its own line(s)
    Standalone,
}

impl DisplayMathPolicy {
    /// Stable name used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            DisplayMathPolicy::AnyPair => "any-pair",
            DisplayMathPolicy::Standalone => "standalone",
        }
    }
}

impl fmt::Display for DisplayMathPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMathPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any-pair" | "any" => Ok(DisplayMathPolicy::AnyPair),
            "standalone" => Ok(DisplayMathPolicy::Standalone),
            other => Err(CoreError::UnknownName {
                what: "display math policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration for [`crate::Segmenter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Display math acceptance policy
    pub display_math: DisplayMathPolicy,
    /// Rules in evaluation order; the first entry has the highest priority
    pub rules: Vec<RuleKind>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            display_math: DisplayMathPolicy::default(),
            rules: RuleKind::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl SegmenterConfig {
    /// Create a builder
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::default()
    }

    /// Parse a configuration from TOML
    ///
    /// ```toml
    /// display_math = "standalone"
    /// rules = ["paragraph", "image", "display-math", "inline-math", "table"]
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SegmenterConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the rule order is usable
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(CoreError::EmptyRuleTable);
        }

        let mut seen = HashSet::with_capacity(self.rules.len());
        for kind in &self.rules {
            if !seen.insert(*kind) {
                return Err(CoreError::DuplicateRule(kind.name().to_string()));
            }
        }

        Ok(())
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    config: SegmenterConfig,
}

impl SegmenterConfigBuilder {
    /// Set the display math policy
    pub fn display_math(mut self, policy: DisplayMathPolicy) -> Self {
        self.config.display_math = policy;
        self
    }

    /// Replace the rule evaluation order
    pub fn rules(mut self, rules: Vec<RuleKind>) -> Self {
        self.config.rules = rules;
        self
    }

    /// Remove a rule from the evaluation order
    pub fn without(mut self, kind: RuleKind) -> Self {
        self.config.rules.retain(|k| *k != kind);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SegmenterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SegmenterConfig::default();
        assert_eq!(config.display_math, DisplayMathPolicy::AnyPair);
        assert_eq!(config.rules, RuleKind::DEFAULT_ORDER.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SegmenterConfig::builder()
            .display_math(DisplayMathPolicy::Standalone)
            .without(RuleKind::Table)
            .build()
            .unwrap();
        assert_eq!(config.display_math, DisplayMathPolicy::Standalone);
        assert_eq!(config.rules.len(), 4);
        assert!(!config.rules.contains(&RuleKind::Table));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_rules() {
        let empty = SegmenterConfig::builder().rules(vec![]).build();
        assert!(matches!(empty, Err(CoreError::EmptyRuleTable)));

        let duplicate = SegmenterConfig::builder()
            .rules(vec![RuleKind::Image, RuleKind::Paragraph, RuleKind::Image])
            .build();
        assert!(matches!(duplicate, Err(CoreError::DuplicateRule(name)) if name == "image"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "standalone".parse::<DisplayMathPolicy>().unwrap(),
            DisplayMathPolicy::Standalone
        );
        assert_eq!(
            "any-pair".parse::<DisplayMathPolicy>().unwrap(),
            DisplayMathPolicy::AnyPair
        );
        assert!("never".parse::<DisplayMathPolicy>().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = SegmenterConfig::from_toml_str(
            r#"
display_math = "standalone"
rules = ["display-math", "paragraph"]
"#,
        )
        .unwrap();
        assert_eq!(config.display_math, DisplayMathPolicy::Standalone);
        assert_eq!(config.rules, vec![RuleKind::DisplayMath, RuleKind::Paragraph]);
    }

    #[test]
    fn test_from_toml_uses_defaults_for_missing_keys() {
        let config = SegmenterConfig::from_toml_str("").unwrap();
        assert_eq!(config, SegmenterConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_rule() {
        let result = SegmenterConfig::from_toml_str(r#"rules = ["heading"]"#);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
