// 📐 Validation Rules - names and bounded values
// Every entity attribute that the ledger accepts passes through one of these rules.

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// NAME RULE
// ============================================================================

/// Length bounds for an identity attribute (name, title, term).
///
/// Lengths count characters, not bytes. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRule {
    #[serde(default)]
    pub min_len: Option<usize>,
    #[serde(default)]
    pub max_len: Option<usize>,
}

impl NameRule {
    /// Inclusive length bounds
    pub const fn between(min_len: usize, max_len: usize) -> Self {
        NameRule {
            min_len: Some(min_len),
            max_len: Some(max_len),
        }
    }

    /// Any string, including the empty one
    pub const fn unbounded() -> Self {
        NameRule {
            min_len: None,
            max_len: None,
        }
    }

    /// Validate `value` for the attribute named `role` (e.g. "Customer.name").
    pub fn check(&self, role: &str, value: &str) -> Result<()> {
        let len = value.chars().count();

        if let Some(min) = self.min_len {
            if len < min {
                return Err(LedgerError::InvalidIdentity {
                    role: role.to_string(),
                    value: value.to_string(),
                    reason: format!("must be at least {} characters, got {}", min, len),
                });
            }
        }

        if let Some(max) = self.max_len {
            if len > max {
                return Err(LedgerError::InvalidIdentity {
                    role: role.to_string(),
                    value: value.to_string(),
                    reason: format!("must be at most {} characters, got {}", max, len),
                });
            }
        }

        Ok(())
    }
}

impl Default for NameRule {
    fn default() -> Self {
        Self::unbounded()
    }
}

// ============================================================================
// VALUE RANGE
// ============================================================================

/// Inclusive numeric bounds for a join attribute (price, hour, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && self.min <= value && value <= self.max
    }

    /// Validate `value` for the attribute named `field` (e.g. "Transaction.price").
    pub fn check(&self, field: &str, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(LedgerError::InvalidRange {
                field: field.to_string(),
                value: value.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            })
        }
    }

    /// Reject ranges that can never accept a value.
    pub fn ensure_well_formed(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(LedgerError::Config(format!(
                "value range [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
