// Association Ledger - Core Library
// Two primary entities linked through a join entity, kept consistent from both sides.
// Exposes all modules for use in the CLI and tests

pub mod aggregates;
pub mod catalog;
pub mod config;
pub mod domains;
pub mod error;
pub mod ledger;
pub mod report;
pub mod seed;
pub mod validation;

// Re-export commonly used types
pub use aggregates::Measured;
pub use catalog::Catalog;
pub use config::LedgerConfig;
pub use domains::{
    CoffeeLedger, CoffeeShop, Enrollment, EnrollmentLedger, HourSpawned, NationalParks,
    ParkLedger, Pizzeria, PizzeriaLedger, Price, SpawnLedger, Spawning, Term, TripDates,
};
pub use error::{LedgerError, Result};
pub use ledger::{Domain, EntityId, Join, JoinId, Ledger, Primary, Role};
pub use report::LedgerSnapshot;
pub use seed::{load_csv, read_rows, seed_ledger, RejectedRow, SeedInput, SeedRow, SeedSummary};
pub use validation::{NameRule, ValueRange};
