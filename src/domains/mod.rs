// 🧩 Domain Models - concrete instantiations of the association pattern
//
// Each domain names its two primary entities and its join entity, and
// supplies the bounds and payload type the ledger validates against.

pub mod coffee_shop;
pub mod enrollment;
pub mod national_parks;
pub mod pizzeria;
pub mod spawning;

pub use coffee_shop::{CoffeeLedger, CoffeeShop};
pub use enrollment::{Enrollment, EnrollmentLedger, Term};
pub use national_parks::{NationalParks, ParkLedger, TripDates};
pub use pizzeria::{Pizzeria, PizzeriaLedger};
pub use spawning::{HourSpawned, SpawnLedger, Spawning};

use crate::aggregates::Measured;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PRICE
// ============================================================================

/// Price carried by a purchase-style join (Transaction, Order).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub f64);

impl Price {
    /// Check against the configured range. Without a range any finite price passes.
    pub(crate) fn check(&self, field: &str, config: &LedgerConfig) -> Result<()> {
        match &config.value_range {
            Some(range) => range.check(field, self.0),
            None if self.0.is_finite() => Ok(()),
            None => Err(non_numeric(field, &self.0.to_string(), config)),
        }
    }

    pub(crate) fn parse(field: &str, raw: &str, config: &LedgerConfig) -> Result<Price> {
        raw.trim()
            .parse::<f64>()
            .map(Price)
            .map_err(|_| non_numeric(field, raw, config))
    }
}

impl Measured for Price {
    fn amount(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Range error for text that is not a usable number at all.
pub(crate) fn non_numeric(field: &str, raw: &str, config: &LedgerConfig) -> LedgerError {
    let (min, max) = match &config.value_range {
        Some(range) => (range.min.to_string(), range.max.to_string()),
        None => ("-inf".to_string(), "inf".to_string()),
    };
    LedgerError::InvalidRange {
        field: field.to_string(),
        value: raw.to_string(),
        min,
        max,
    }
}
