// ⚙️ Ledger Configuration
// Per-domain validation bounds, with optional JSON overrides.

use crate::error::{LedgerError, Result};
use crate::validation::{NameRule, ValueRange};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Validation bounds a ledger enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Rule for names on the left side (Customer, Visitor, Student, Mob)
    pub left_name: NameRule,

    /// Rule for names on the right side (Coffee, NationalPark, Course, Biome)
    pub right_name: NameRule,

    /// Bound on the join's numeric attribute, if the domain has one
    #[serde(default)]
    pub value_range: Option<ValueRange>,
}

/// Partial config as read from a file; missing fields keep the domain default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    left_name: Option<NameRule>,
    right_name: Option<NameRule>,
    value_range: Option<ValueRange>,
}

impl LedgerConfig {
    pub fn new(left_name: NameRule, right_name: NameRule, value_range: Option<ValueRange>) -> Self {
        LedgerConfig {
            left_name,
            right_name,
            value_range,
        }
    }

    /// Apply JSON overrides on top of `defaults`.
    ///
    /// Example: `{"value_range": {"min": 1, "max": 100}}`
    pub fn from_json_str(defaults: LedgerConfig, json: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        defaults.merge(overrides)
    }

    /// Read overrides from a JSON file.
    pub fn from_json_file(defaults: LedgerConfig, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(defaults, &contents)
    }

    fn merge(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(rule) = overrides.left_name {
            self.left_name = rule;
        }
        if let Some(rule) = overrides.right_name {
            self.right_name = rule;
        }
        if let Some(range) = overrides.value_range {
            if self.value_range.is_none() {
                return Err(LedgerError::Config(
                    "this domain has no bounded value to configure".to_string(),
                ));
            }
            self.value_range = Some(range);
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject configs whose rules can never accept anything.
    pub fn validate(&self) -> Result<()> {
        for (side, rule) in [("left_name", &self.left_name), ("right_name", &self.right_name)] {
            if let (Some(min), Some(max)) = (rule.min_len, rule.max_len) {
                if min > max {
                    return Err(LedgerError::Config(format!(
                        "{}: min_len {} exceeds max_len {}",
                        side, min, max
                    )));
                }
            }
        }

        if let Some(range) = &self.value_range {
            range.ensure_well_formed()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn defaults() -> LedgerConfig {
        LedgerConfig::new(
            NameRule::between(1, 15),
            NameRule::unbounded(),
            Some(ValueRange::new(1.0, 50.0)),
        )
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let config = LedgerConfig::from_json_str(defaults(), "{}").unwrap();
        assert_eq!(config, defaults());
    }

    #[test]
    fn test_partial_override() {
        let config =
            LedgerConfig::from_json_str(defaults(), r#"{"value_range": {"min": 1, "max": 100}}"#)
                .unwrap();

        assert_eq!(config.value_range, Some(ValueRange::new(1.0, 100.0)));
        assert_eq!(config.left_name, NameRule::between(1, 15));
    }

    #[test]
    fn test_name_rule_override_with_missing_bound() {
        let config =
            LedgerConfig::from_json_str(defaults(), r#"{"left_name": {"max_len": 30}}"#).unwrap();

        assert_eq!(config.left_name.min_len, None);
        assert_eq!(config.left_name.max_len, Some(30));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = LedgerConfig::from_json_str(defaults(), r#"{"price": 5}"#);
        assert!(matches!(result, Err(LedgerError::Json(_))));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let result =
            LedgerConfig::from_json_str(defaults(), r#"{"value_range": {"min": 50, "max": 1}}"#);
        assert!(matches!(result, Err(LedgerError::Config(_))));

        let result = LedgerConfig::from_json_str(
            defaults(),
            r#"{"left_name": {"min_len": 10, "max_len": 2}}"#,
        );
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_value_range_on_unbounded_domain() {
        let no_range = LedgerConfig::new(NameRule::unbounded(), NameRule::unbounded(), None);
        let result =
            LedgerConfig::from_json_str(no_range, r#"{"value_range": {"min": 1, "max": 2}}"#);
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"right_name": {{"min_len": 1, "max_len": 20}}}}"#).unwrap();

        let config = LedgerConfig::from_json_file(defaults(), file.path()).unwrap();
        assert_eq!(config.right_name, NameRule::between(1, 20));
    }

    #[test]
    fn test_demo_wide_prices() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/wide_prices.json");
        let config = LedgerConfig::from_json_file(defaults(), &path).unwrap();

        assert_eq!(config.value_range, Some(ValueRange::new(1.0, 100.0)));
        assert_eq!(config.left_name, NameRule::between(1, 15));
    }

    #[test]
    fn test_missing_file() {
        let result =
            LedgerConfig::from_json_file(defaults(), Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(LedgerError::Io(_))));
    }
}
