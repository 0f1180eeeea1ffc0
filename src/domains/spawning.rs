// 🧟 Spawning - Mob ↔ Spawn ↔ Biome
//
// A spawn records the in-game hour (0-23) a mob appeared in a biome.

use crate::aggregates::Measured;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::ledger::{Domain, EntityId, Ledger, Primary, Role};
use crate::validation::{NameRule, ValueRange};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourSpawned(pub u32);

impl Measured for HourSpawned {
    fn amount(&self) -> f64 {
        f64::from(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawning;

pub type SpawnLedger = Ledger<Spawning>;

impl Domain for Spawning {
    type Payload = HourSpawned;

    const LEFT: &'static str = "Mob";
    const RIGHT: &'static str = "Biome";
    const JOIN: &'static str = "Spawn";

    fn default_config() -> LedgerConfig {
        LedgerConfig::new(
            NameRule::between(1, 20),
            NameRule::between(1, 20),
            Some(ValueRange::new(0.0, 23.0)),
        )
    }

    fn validate_payload(hour: &HourSpawned, config: &LedgerConfig) -> Result<()> {
        match &config.value_range {
            Some(range) => range.check("Spawn.hour_spawned", hour.amount()),
            None => Ok(()),
        }
    }

    fn describe(mob: &str, biome: &str, hour: &HourSpawned) -> String {
        format!("{} spawned in {} at {:02}:00.", mob, biome, hour.0)
    }

    fn parse_payload(raw: &str, config: &LedgerConfig) -> Result<HourSpawned> {
        raw.trim()
            .parse::<u32>()
            .map(HourSpawned)
            .map_err(|_| crate::domains::non_numeric("Spawn.hour_spawned", raw, config))
    }
}

impl Ledger<Spawning> {
    /// Mobs that spawned in `biome` at exactly `hour`, each listed once
    pub fn mobs_at_hour(&self, biome: EntityId, hour: u32) -> Result<Vec<&Primary>> {
        if biome.role() != Role::Right {
            return Err(LedgerError::InvalidAssociation {
                expected: Spawning::RIGHT.to_string(),
                reason: format!("{} is a {}", biome, Spawning::LEFT),
            });
        }

        let mut mobs: Vec<EntityId> = Vec::new();
        for join in self.joins_of(biome)? {
            if join.payload().0 == hour && !mobs.contains(&join.left()) {
                mobs.push(join.left());
            }
        }

        mobs.into_iter().map(|m| self.entity(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mob_biomes() {
        let mut ledger = SpawnLedger::new();
        let zombie = ledger.add_left("Zombie").unwrap();
        let plains = ledger.add_right("Plains").unwrap();
        let desert = ledger.add_right("Desert").unwrap();

        ledger.associate(zombie, plains, HourSpawned(22)).unwrap();
        ledger.associate(zombie, plains, HourSpawned(23)).unwrap();
        ledger.associate(zombie, desert, HourSpawned(1)).unwrap();

        assert_eq!(ledger.counterparts(zombie).unwrap().len(), 2);
        assert_eq!(ledger.join_count(plains).unwrap(), 2);
        assert_eq!(ledger.average(plains).unwrap(), 22.5);

        // Night-time biomes for the zombie
        let late: Vec<&str> = ledger
            .counterparts_in_range(zombie, 20.0, 23.0)
            .unwrap()
            .iter()
            .map(|b| b.name())
            .collect();
        assert_eq!(late, vec!["Plains", "Plains"]);
    }

    #[test]
    fn test_hour_bounds() {
        let mut ledger = SpawnLedger::new();
        let creeper = ledger.add_left("Creeper").unwrap();
        let forest = ledger.add_right("Forest").unwrap();

        assert!(ledger.associate(creeper, forest, HourSpawned(0)).is_ok());
        assert!(matches!(
            ledger.associate(creeper, forest, HourSpawned(24)),
            Err(LedgerError::InvalidRange { .. })
        ));
        assert_eq!(ledger.count(), 1);
    }

    #[test]
    fn test_mobs_at_hour() {
        let mut ledger = SpawnLedger::new();
        let zombie = ledger.add_left("Zombie").unwrap();
        let skeleton = ledger.add_left("Skeleton").unwrap();
        let plains = ledger.add_right("Plains").unwrap();

        ledger.associate(zombie, plains, HourSpawned(22)).unwrap();
        ledger.associate(skeleton, plains, HourSpawned(22)).unwrap();
        ledger.associate(zombie, plains, HourSpawned(22)).unwrap();
        ledger.associate(skeleton, plains, HourSpawned(3)).unwrap();

        let at_22: Vec<&str> = ledger.mobs_at_hour(plains, 22).unwrap().iter().map(|m| m.name()).collect();
        assert_eq!(at_22, vec!["Zombie", "Skeleton"]);
        assert!(ledger.mobs_at_hour(zombie, 22).is_err());
    }

    #[test]
    fn test_parse_and_describe() {
        let config = Spawning::default_config();
        assert_eq!(Spawning::parse_payload(" 7 ", &config).unwrap(), HourSpawned(7));
        assert!(Spawning::parse_payload("dusk", &config).is_err());
        assert_eq!(
            Spawning::describe("Zombie", "Plains", &HourSpawned(7)),
            "Zombie spawned in Plains at 07:00."
        );
    }

    #[test]
    fn test_name_length() {
        let mut ledger = SpawnLedger::new();
        assert!(ledger.add_right("Deep Lukewarm Ocean Biome").is_err());
        assert!(ledger.add_right("Deep Lukewarm Ocean").is_ok());
    }
}
