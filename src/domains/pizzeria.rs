// 🍕 Pizzeria - Customer ↔ Order ↔ Pizza

use super::Price;
use crate::config::LedgerConfig;
use crate::error::Result;
use crate::ledger::{Domain, EntityId, JoinId, Ledger};
use crate::validation::{NameRule, ValueRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pizzeria;

pub type PizzeriaLedger = Ledger<Pizzeria>;

impl Domain for Pizzeria {
    type Payload = Price;

    const LEFT: &'static str = "Customer";
    const RIGHT: &'static str = "Pizza";
    const JOIN: &'static str = "Order";

    fn default_config() -> LedgerConfig {
        LedgerConfig::new(
            NameRule::between(1, 15),
            NameRule::unbounded(),
            Some(ValueRange::new(1.0, 50.0)),
        )
    }

    fn validate_payload(payload: &Price, config: &LedgerConfig) -> Result<()> {
        payload.check("Order.price", config)
    }

    fn describe(customer: &str, pizza: &str, price: &Price) -> String {
        format!("{} ordered a {} for {}.", customer, pizza, price)
    }

    fn parse_payload(raw: &str, config: &LedgerConfig) -> Result<Price> {
        Price::parse("Order.price", raw, config)
    }
}

impl Ledger<Pizzeria> {
    pub fn place_order(
        &mut self,
        customer: EntityId,
        pizza_name: impl Into<String>,
        price: f64,
    ) -> Result<(EntityId, JoinId)> {
        self.associate_new_right(customer, pizza_name, Price(price))
    }
}
