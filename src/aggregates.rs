// 📊 Aggregates - totals, averages and range filters over numeric joins

use crate::error::{LedgerError, Result};
use crate::ledger::{Domain, EntityId, Ledger, Primary, Role};

/// Default bounds for `counterparts_in_default_range`
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 999.0;

/// A join payload that can be summed and averaged.
pub trait Measured {
    fn amount(&self) -> f64;
}

impl<D> Ledger<D>
where
    D: Domain,
    D::Payload: Measured,
{
    /// Join values for `id`, in join order
    pub fn amounts(&self, id: EntityId) -> Result<Vec<f64>> {
        Ok(self
            .joins_of(id)?
            .into_iter()
            .map(|join| join.payload().amount())
            .collect())
    }

    /// Sum of join values (0 when there are no joins)
    pub fn total(&self, id: EntityId) -> Result<f64> {
        Ok(self.amounts(id)?.iter().sum())
    }

    /// Mean join value. An entity with no joins has no average.
    pub fn average(&self, id: EntityId) -> Result<f64> {
        let amounts = self.amounts(id)?;
        if amounts.is_empty() {
            return Err(LedgerError::EmptyAggregate {
                name: self.name(id)?.to_string(),
            });
        }
        Ok(amounts.iter().sum::<f64>() / amounts.len() as f64)
    }

    /// Counterparts whose join value lies in `[min, max]`, one entry per
    /// qualifying join, in join order. Only defined for the left side.
    pub fn counterparts_in_range(&self, id: EntityId, min: f64, max: f64) -> Result<Vec<&Primary>> {
        if id.role() != Role::Left {
            return Err(LedgerError::InvalidAssociation {
                expected: D::LEFT.to_string(),
                reason: format!("range filter is only defined for {}", D::LEFT),
            });
        }

        self.joins_of(id)?
            .into_iter()
            .filter(|join| {
                let amount = join.payload().amount();
                min <= amount && amount <= max
            })
            .map(|join| self.entity(join.right()))
            .collect()
    }

    pub fn counterparts_in_default_range(&self, id: EntityId) -> Result<Vec<&Primary>> {
        self.counterparts_in_range(id, DEFAULT_MIN, DEFAULT_MAX)
    }
}
