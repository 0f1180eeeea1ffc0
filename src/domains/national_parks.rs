// 🏞️ National Parks - Visitor ↔ Trip ↔ NationalPark
//
// Trips carry dates instead of a price. When none are given a trip starts
// today and ends tomorrow.

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::ledger::{Domain, EntityId, JoinId, Ledger, Primary, Role};
use crate::validation::NameRule;
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%m/%d/%Y";

// ============================================================================
// TRIP DATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TripDates {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        TripDates { start, end }
    }

    /// Today through tomorrow
    pub fn default_span() -> Self {
        let today = Local::now().date_naive();
        TripDates {
            start: today,
            end: today + Duration::days(1),
        }
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// `YYYY-MM-DD..YYYY-MM-DD`, or empty for the default span
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default_span());
        }

        let invalid = || LedgerError::InvalidRange {
            field: "Trip.dates".to_string(),
            value: raw.to_string(),
            min: "YYYY-MM-DD".to_string(),
            max: "YYYY-MM-DD".to_string(),
        };

        let (start, end) = raw.split_once("..").ok_or_else(invalid)?;
        let start = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).map_err(|_| invalid())?;
        let end = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT).map_err(|_| invalid())?;
        Ok(TripDates { start, end })
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NationalParks;

pub type ParkLedger = Ledger<NationalParks>;

impl Domain for NationalParks {
    type Payload = TripDates;

    const LEFT: &'static str = "Visitor";
    const RIGHT: &'static str = "NationalPark";
    const JOIN: &'static str = "Trip";

    fn default_config() -> LedgerConfig {
        LedgerConfig::new(NameRule::between(1, 15), NameRule::unbounded(), None)
    }

    fn validate_payload(dates: &TripDates, _config: &LedgerConfig) -> Result<()> {
        if dates.end < dates.start {
            return Err(LedgerError::InvalidRange {
                field: "Trip.end_date".to_string(),
                value: dates.end.format(DATE_FORMAT).to_string(),
                min: dates.start.format(DATE_FORMAT).to_string(),
                max: "any later date".to_string(),
            });
        }
        Ok(())
    }

    fn describe(visitor: &str, park: &str, dates: &TripDates) -> String {
        format!(
            "{} is going on a trip to {} from {} to {}.",
            visitor,
            park,
            dates.start.format(DISPLAY_FORMAT),
            dates.end.format(DISPLAY_FORMAT)
        )
    }

    fn parse_payload(raw: &str, _config: &LedgerConfig) -> Result<TripDates> {
        TripDates::parse(raw)
    }
}

impl Ledger<NationalParks> {
    /// Trip with the default dates
    pub fn plan_trip(&mut self, visitor: EntityId, park: EntityId) -> Result<JoinId> {
        self.associate(visitor, park, TripDates::default_span())
    }

    /// Trips per visitor for `park`, in first-visit order
    pub fn visitation_counts(&self, park: EntityId) -> Result<Vec<(EntityId, usize)>> {
        if park.role() != Role::Right {
            return Err(LedgerError::InvalidAssociation {
                expected: NationalParks::RIGHT.to_string(),
                reason: format!("{} is a {}", park, NationalParks::LEFT),
            });
        }
        self.join_counts_by_counterpart(park)
    }

    /// Visitor with the most trips to `park`. Ties go to whoever came first in
    /// first-visit order, not to whoever reached the top count first.
    pub fn most_frequent_visitor(&self, park: EntityId) -> Result<&Primary> {
        let mut best: Option<(EntityId, usize)> = None;
        for (visitor, count) in self.visitation_counts(park)? {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((visitor, count));
            }
        }

        match best {
            Some((visitor, _)) => self.entity(visitor),
            None => Err(LedgerError::EmptyAggregate {
                name: self.name(park)?.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_visitor_parks_and_trip_counter() {
        let mut ledger = ParkLedger::new();
        let bart = ledger.add_left("Bartholomew").unwrap();
        let park1 = ledger.add_right("Yellowstone").unwrap();
        let park2 = ledger.add_right("Acadia").unwrap();

        ledger.plan_trip(bart, park1).unwrap();
        ledger.plan_trip(bart, park2).unwrap();

        assert_eq!(ledger.counterparts(bart).unwrap().len(), 2);
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn test_park_unique_visitors() {
        let mut ledger = ParkLedger::new();
        let park = ledger.add_right("Flatirons").unwrap();
        let john = ledger.add_left("John").unwrap();
        let tom = ledger.add_left("Tom").unwrap();

        ledger.plan_trip(john, park).unwrap();
        ledger.plan_trip(tom, park).unwrap();
        ledger.plan_trip(tom, park).unwrap();

        assert_eq!(ledger.counterparts(park).unwrap().len(), 2);
        assert_eq!(ledger.join_count(park).unwrap(), 3);
    }

    #[test]
    fn test_most_frequent_visitor() {
        let mut ledger = ParkLedger::new();
        let park = ledger.add_right("Flatirons").unwrap();
        let john = ledger.add_left("John").unwrap();
        let tom = ledger.add_left("Tom").unwrap();

        ledger.plan_trip(john, park).unwrap();
        ledger.plan_trip(tom, park).unwrap();
        ledger.plan_trip(tom, park).unwrap();

        assert_eq!(ledger.most_frequent_visitor(park).unwrap().name(), "Tom");
        assert_eq!(
            ledger.visitation_counts(park).unwrap(),
            vec![(john, 1), (tom, 2)]
        );
    }

    #[test]
    fn test_most_frequent_visitor_tie_goes_to_first() {
        let mut ledger = ParkLedger::new();
        let park = ledger.add_right("Zion").unwrap();
        let ann = ledger.add_left("Ann").unwrap();
        let bob = ledger.add_left("Bob").unwrap();

        ledger.plan_trip(ann, park).unwrap();
        ledger.plan_trip(bob, park).unwrap();

        assert_eq!(ledger.most_frequent_visitor(park).unwrap().name(), "Ann");
    }

    #[test]
    fn test_most_frequent_visitor_tie_uses_first_visit_order() {
        let mut ledger = ParkLedger::new();
        let park = ledger.add_right("Zion").unwrap();
        let ann = ledger.add_left("Ann").unwrap();
        let bob = ledger.add_left("Bob").unwrap();

        // Bob reaches two trips before Ann does
        ledger.plan_trip(ann, park).unwrap();
        ledger.plan_trip(bob, park).unwrap();
        ledger.plan_trip(bob, park).unwrap();
        ledger.plan_trip(ann, park).unwrap();

        assert_eq!(ledger.most_frequent_visitor(park).unwrap().name(), "Ann");
    }

    #[test]
    fn test_most_frequent_visitor_empty_park() {
        let mut ledger = ParkLedger::new();
        let park = ledger.add_right("Denali").unwrap();
        let visitor = ledger.add_left("Ann").unwrap();

        assert!(matches!(
            ledger.most_frequent_visitor(park),
            Err(LedgerError::EmptyAggregate { .. })
        ));
        assert!(matches!(
            ledger.most_frequent_visitor(visitor),
            Err(LedgerError::InvalidAssociation { .. })
        ));
    }

    #[test]
    fn test_default_span() {
        let dates = TripDates::default_span();
        assert_eq!(dates.nights(), 1);
    }

    #[test]
    fn test_trip_description() {
        let mut ledger = ParkLedger::new();
        let john = ledger.add_left("John").unwrap();
        let park = ledger.add_right("Acadia").unwrap();

        let trip = ledger
            .associate(john, park, TripDates::new(date(2024, 7, 1), date(2024, 7, 4)))
            .unwrap();

        assert_eq!(
            ledger.describe(trip).unwrap(),
            "John is going on a trip to Acadia from 07/01/2024 to 07/04/2024."
        );
    }

    #[test]
    fn test_trip_end_before_start_rejected() {
        let mut ledger = ParkLedger::new();
        let john = ledger.add_left("John").unwrap();
        let park = ledger.add_right("Acadia").unwrap();

        let result = ledger.associate(john, park, TripDates::new(date(2024, 7, 4), date(2024, 7, 1)));
        assert!(matches!(result, Err(LedgerError::InvalidRange { .. })));
        assert_eq!(ledger.join_count(john).unwrap(), 0);
    }

    #[test]
    fn test_parse_dates() {
        let dates = TripDates::parse("2024-07-01..2024-07-04").unwrap();
        assert_eq!(dates, TripDates::new(date(2024, 7, 1), date(2024, 7, 4)));
        assert_eq!(dates.nights(), 3);

        assert_eq!(TripDates::parse("").unwrap().nights(), 1);
        assert!(TripDates::parse("2024-07-01").is_err());
        assert!(TripDates::parse("07/01/2024..07/04/2024").is_err());
    }

    #[test]
    fn test_visitor_name_rule() {
        let mut ledger = ParkLedger::new();
        assert!(ledger.add_left("").is_err());
        assert!(ledger.add_left("AVisitorNameWayTooLong").is_err());
    }
}
