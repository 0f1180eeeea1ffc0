// 📄 Ledger Snapshot - serializable view of a ledger for JSON output

use crate::error::Result;
use crate::ledger::{Domain, Ledger, Primary, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EntitySnapshot {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub join_count: usize,
    pub counterparts: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct JoinSnapshot<P> {
    pub id: String,
    pub sequence: u64,
    pub left: String,
    pub right: String,
    pub payload: P,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct LedgerSnapshot<P> {
    pub left_label: &'static str,
    pub right_label: &'static str,
    pub join_label: &'static str,
    pub entities: Vec<EntitySnapshot>,
    pub joins: Vec<JoinSnapshot<P>>,
    pub catalog_count: u64,
}

impl<P: Serialize + Clone> LedgerSnapshot<P> {
    /// Capture every entity (left side first) and every join in the catalog.
    pub fn capture<D: Domain<Payload = P>>(ledger: &Ledger<D>) -> Result<Self> {
        let mut entities = Vec::new();
        for role in [Role::Left, Role::Right] {
            for entity in ledger.entities(role) {
                entities.push(snapshot_entity(ledger, entity)?);
            }
        }

        let mut joins = Vec::new();
        for join in ledger.catalog_joins() {
            joins.push(JoinSnapshot {
                id: join.id().to_string(),
                sequence: join.sequence(),
                left: ledger.name(join.left())?.to_string(),
                right: ledger.name(join.right())?.to_string(),
                payload: join.payload().clone(),
                description: ledger.describe(join.id())?,
                created_at: join.created_at(),
            });
        }

        Ok(LedgerSnapshot {
            left_label: D::LEFT,
            right_label: D::RIGHT,
            join_label: D::JOIN,
            entities,
            joins,
            catalog_count: ledger.count(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn snapshot_entity<D: Domain>(ledger: &Ledger<D>, entity: &Primary) -> Result<EntitySnapshot> {
    let counterparts = ledger
        .counterparts(entity.id())?
        .into_iter()
        .map(|c| c.name().to_string())
        .collect();

    Ok(EntitySnapshot {
        id: entity.id().to_string(),
        role: entity.role(),
        name: entity.name().to_string(),
        join_count: entity.join_count(),
        counterparts,
        created_at: entity.created_at(),
    })
}
