// ☕ Coffee Shop - Customer ↔ Transaction ↔ Coffee
//
// Customer names: 1-15 characters
// Coffee names: any string
// Transaction price: 1-50

use super::Price;
use crate::config::LedgerConfig;
use crate::error::Result;
use crate::ledger::{Domain, EntityId, JoinId, Ledger};
use crate::validation::{NameRule, ValueRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoffeeShop;

pub type CoffeeLedger = Ledger<CoffeeShop>;

impl Domain for CoffeeShop {
    type Payload = Price;

    const LEFT: &'static str = "Customer";
    const RIGHT: &'static str = "Coffee";
    const JOIN: &'static str = "Transaction";

    fn default_config() -> LedgerConfig {
        LedgerConfig::new(
            NameRule::between(1, 15),
            NameRule::unbounded(),
            Some(ValueRange::new(1.0, 50.0)),
        )
    }

    fn validate_payload(payload: &Price, config: &LedgerConfig) -> Result<()> {
        payload.check("Transaction.price", config)
    }

    fn describe(customer: &str, coffee: &str, price: &Price) -> String {
        format!("{} ordered a {} for {}.", customer, coffee, price)
    }

    fn parse_payload(raw: &str, config: &LedgerConfig) -> Result<Price> {
        Price::parse("Transaction.price", raw, config)
    }
}

impl Ledger<CoffeeShop> {
    /// Order a brand-new coffee for `customer`.
    pub fn place_order(
        &mut self,
        customer: EntityId,
        coffee_name: impl Into<String>,
        price: f64,
    ) -> Result<(EntityId, JoinId)> {
        self.associate_new_right(customer, coffee_name, Price(price))
    }

    /// Total money `customer` has spent
    pub fn total_spent(&self, customer: EntityId) -> Result<f64> {
        self.total(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::ledger::Role;

    #[test]
    fn test_customer_has_many_transactions() {
        let mut ledger = CoffeeLedger::new();
        let coffee = ledger.add_right("Cappuccino").unwrap();
        let steve = ledger.add_left("Steve").unwrap();
        let dima = ledger.add_left("Dima").unwrap();

        let t1 = ledger.associate(steve, coffee, Price(2.0)).unwrap();
        let t2 = ledger.associate(steve, coffee, Price(5.0)).unwrap();
        let t3 = ledger.associate(dima, coffee, Price(5.0)).unwrap();

        let steve_joins = ledger.entity(steve).unwrap().joins();
        assert_eq!(steve_joins.len(), 2);
        assert!(steve_joins.contains(&t1));
        assert!(steve_joins.contains(&t2));
        assert!(!steve_joins.contains(&t3));
    }

    #[test]
    fn test_customer_has_unique_coffees() {
        let mut ledger = CoffeeLedger::new();
        let cappuccino = ledger.add_right("Cappuccino").unwrap();
        let macchiato = ledger.add_right("Macchiato").unwrap();
        let steve = ledger.add_left("Steve").unwrap();

        ledger.associate(steve, cappuccino, Price(2.0)).unwrap();
        ledger.associate(steve, cappuccino, Price(2.0)).unwrap();
        ledger.associate(steve, macchiato, Price(5.0)).unwrap();

        let coffees: Vec<EntityId> = ledger
            .counterparts(steve)
            .unwrap()
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(coffees, vec![cappuccino, macchiato]);
    }

    #[test]
    fn test_coffee_has_unique_customers() {
        let mut ledger = CoffeeLedger::new();
        let coffee = ledger.add_right("Cappuccino").unwrap();
        let steve = ledger.add_left("Steve").unwrap();
        let dima = ledger.add_left("Dima").unwrap();

        ledger.associate(steve, coffee, Price(2.0)).unwrap();
        ledger.associate(dima, coffee, Price(3.0)).unwrap();
        ledger.associate(steve, coffee, Price(4.0)).unwrap();

        assert_eq!(ledger.counterparts(coffee).unwrap().len(), 2);
        assert_eq!(ledger.join_count(coffee).unwrap(), 3);
        assert_eq!(ledger.average(coffee).unwrap(), 3.0);
    }

    #[test]
    fn test_price_bounds() {
        let mut ledger = CoffeeLedger::new();
        let customer = ledger.add_left("Steve").unwrap();
        let coffee = ledger.add_right("Mocha").unwrap();

        assert!(matches!(
            ledger.associate(customer, coffee, Price(0.0)),
            Err(LedgerError::InvalidRange { .. })
        ));
        assert!(matches!(
            ledger.associate(customer, coffee, Price(51.0)),
            Err(LedgerError::InvalidRange { .. })
        ));
        assert_eq!(ledger.join_count(customer).unwrap(), 0);

        assert!(ledger.associate(customer, coffee, Price(1.0)).is_ok());
        assert!(ledger.associate(customer, coffee, Price(50.0)).is_ok());
    }

    #[test]
    fn test_place_order() {
        let mut ledger = CoffeeLedger::new();
        let steve = ledger.add_left("Steve").unwrap();

        let (flat_white, join) = ledger.place_order(steve, "Flat White", 4.5).unwrap();

        assert_eq!(ledger.name(flat_white).unwrap(), "Flat White");
        assert_eq!(ledger.entity(steve).unwrap().counterpart_ids(), &[flat_white]);
        assert_eq!(
            ledger.describe(join).unwrap(),
            "Steve ordered a Flat White for $4.5."
        );

        // Rejected orders leave no stray coffee behind
        assert!(ledger.place_order(steve, "Gold Latte", 500.0).is_err());
        assert_eq!(ledger.entities(Role::Right).len(), 1);
    }

    #[test]
    fn test_total_spent() {
        let mut ledger = CoffeeLedger::new();
        let steve = ledger.add_left("Steve").unwrap();
        ledger.place_order(steve, "Latte", 4.0).unwrap();
        ledger.place_order(steve, "Mocha", 5.5).unwrap();

        assert_eq!(ledger.total_spent(steve).unwrap(), 9.5);
    }

    #[test]
    fn test_coffee_name_accepts_any_string() {
        let mut ledger = CoffeeLedger::new();
        assert!(ledger.add_right("An Extraordinarily Long Coffee Name").is_ok());
    }
}
