// 🔗 Association Ledger - two primary entities linked through a join entity
//
// Customer ↔ Transaction ↔ Coffee, Visitor ↔ Trip ↔ NationalPark, ...
//
// Each side keeps:
// - an ordered sequence of the joins it takes part in (repeat visits allowed)
// - an ordered, duplicate-free sequence of counterparts on the other side
//
// The ledger owns every entity, every join and the catalog. Nothing here is
// global: two ledgers never see each other's entities.

use crate::catalog::Catalog;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

// ============================================================================
// ROLES & IDENTITY
// ============================================================================

/// Which side of the association an entity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Customer, Visitor, Student, Mob
    Left,
    /// Coffee, NationalPark, Course, Biome
    Right,
}

impl Role {
    pub fn opposite(self) -> Role {
        match self {
            Role::Left => Role::Right,
            Role::Right => Role::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Left => "left",
            Role::Right => "right",
        }
    }
}

/// Stable identity of a primary entity. Carries its role so that a join can
/// check what it was handed without knowing the concrete entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    role: Role,
    uuid: Uuid,
}

impl EntityId {
    fn new(role: Role) -> Self {
        EntityId {
            role,
            uuid: Uuid::new_v4(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role.as_str(), self.uuid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinId(Uuid);

impl JoinId {
    fn new() -> Self {
        JoinId(Uuid::new_v4())
    }
}

impl fmt::Display for JoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "join:{}", self.0)
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

/// A concrete instantiation of the pattern (coffee shop, national parks, ...).
///
/// The domain names its three roles, owns the join's payload type and knows
/// how to validate and describe it. It never sees the other domain types,
/// only names and payloads.
pub trait Domain: fmt::Debug + Clone + 'static {
    /// Attribute carried by each join (price, trip dates, term, ...)
    type Payload: Clone + fmt::Debug + Serialize;

    const LEFT: &'static str;
    const RIGHT: &'static str;
    const JOIN: &'static str;

    /// Bounds used when a ledger is built without an explicit config
    fn default_config() -> LedgerConfig;

    fn validate_payload(payload: &Self::Payload, config: &LedgerConfig) -> Result<()>;

    /// Human-readable one-liner for a join
    fn describe(left: &str, right: &str, payload: &Self::Payload) -> String;

    /// Parse a payload from its text form (seed files, CLI).
    fn parse_payload(raw: &str, config: &LedgerConfig) -> Result<Self::Payload>;

    fn label(role: Role) -> &'static str {
        match role {
            Role::Left => Self::LEFT,
            Role::Right => Self::RIGHT,
        }
    }
}

// ============================================================================
// PRIMARY ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Primary {
    id: EntityId,
    name: String,
    joins: Vec<JoinId>,
    counterparts: Vec<EntityId>,
    created_at: DateTime<Utc>,
}

impl Primary {
    fn new(role: Role, name: String) -> Self {
        Primary {
            id: EntityId::new(role),
            name,
            joins: Vec::new(),
            counterparts: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.id.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Joins in construction order. The same pair may appear more than once.
    pub fn joins(&self) -> &[JoinId] {
        &self.joins
    }

    /// Counterparts in first-join order, each at most once.
    pub fn counterpart_ids(&self) -> &[EntityId] {
        &self.counterparts
    }

    pub fn join_count(&self) -> usize {
        self.joins.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ============================================================================
// JOIN ENTITY
// ============================================================================

#[derive(Debug, Clone)]
pub struct Join<D: Domain> {
    id: JoinId,
    left: EntityId,
    right: EntityId,
    payload: D::Payload,
    sequence: u64,
    created_at: DateTime<Utc>,
}

impl<D: Domain> Join<D> {
    pub fn id(&self) -> JoinId {
        self.id
    }

    pub fn left(&self) -> EntityId {
        self.left
    }

    pub fn right(&self) -> EntityId {
        self.right
    }

    /// The entity on the other side from `id`, if this join touches `id` at all.
    pub fn other_side(&self, id: EntityId) -> Option<EntityId> {
        if id == self.left {
            Some(self.right)
        } else if id == self.right {
            Some(self.left)
        } else {
            None
        }
    }

    pub fn payload(&self) -> &D::Payload {
        &self.payload
    }

    /// 1-based position in the catalog at construction time
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone)]
pub struct Ledger<D: Domain> {
    config: LedgerConfig,
    entities: HashMap<EntityId, Primary>,
    left_order: Vec<EntityId>,
    right_order: Vec<EntityId>,
    joins: HashMap<JoinId, Join<D>>,
    catalog: Catalog<JoinId>,
}

impl<D: Domain> Ledger<D> {
    /// Empty ledger with the domain's default bounds
    pub fn new() -> Self {
        Ledger {
            config: D::default_config(),
            entities: HashMap::new(),
            left_order: Vec::new(),
            right_order: Vec::new(),
            joins: HashMap::new(),
            catalog: Catalog::new(),
        }
    }

    /// Empty ledger with custom bounds
    pub fn with_config(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        let mut ledger = Self::new();
        ledger.config = config;
        Ok(ledger)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Primary entities
    // ------------------------------------------------------------------------

    /// Check a name against the rule for `role` without creating anything.
    pub fn check_name(&self, role: Role, name: &str) -> Result<()> {
        let rule = match role {
            Role::Left => &self.config.left_name,
            Role::Right => &self.config.right_name,
        };
        rule.check(&format!("{}.name", D::label(role)), name)
    }

    /// Check a payload against the domain rule without creating anything.
    pub fn check_payload(&self, payload: &D::Payload) -> Result<()> {
        D::validate_payload(payload, &self.config)
    }

    pub fn add(&mut self, role: Role, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();
        self.check_name(role, &name)?;

        let entity = Primary::new(role, name);
        let id = entity.id;
        debug!(role = D::label(role), name = %entity.name, %id, "registered entity");

        self.entities.insert(id, entity);
        match role {
            Role::Left => self.left_order.push(id),
            Role::Right => self.right_order.push(id),
        }
        Ok(id)
    }

    pub fn add_left(&mut self, name: impl Into<String>) -> Result<EntityId> {
        self.add(Role::Left, name)
    }

    pub fn add_right(&mut self, name: impl Into<String>) -> Result<EntityId> {
        self.add(Role::Right, name)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Primary> {
        self.entities
            .get(&id)
            .ok_or_else(|| LedgerError::UnknownEntity(id.to_string()))
    }

    pub fn name(&self, id: EntityId) -> Result<&str> {
        self.entity(id).map(Primary::name)
    }

    /// Entities of one role, in creation order
    pub fn entities(&self, role: Role) -> Vec<&Primary> {
        let order = match role {
            Role::Left => &self.left_order,
            Role::Right => &self.right_order,
        };
        order.iter().filter_map(|id| self.entities.get(id)).collect()
    }

    /// First entity of `role` with exactly this name
    pub fn find_by_name(&self, role: Role, name: &str) -> Option<&Primary> {
        self.entities(role).into_iter().find(|e| e.name == name)
    }

    /// Reassign a name. The new name must pass the same rule as at construction.
    pub fn rename(&mut self, id: EntityId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.check_name(id.role, &name)?;

        let entity = self
            .entities
            .get_mut(&id)
            .ok_or_else(|| LedgerError::UnknownEntity(id.to_string()))?;
        entity.name = name;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Join entities
    // ------------------------------------------------------------------------

    fn expect_role(&self, id: EntityId, role: Role) -> Result<&Primary> {
        if id.role != role {
            return Err(LedgerError::InvalidAssociation {
                expected: D::label(role).to_string(),
                reason: format!("{} is a {}", id, D::label(id.role)),
            });
        }

        self.entities
            .get(&id)
            .ok_or_else(|| LedgerError::InvalidAssociation {
                expected: D::label(role).to_string(),
                reason: format!("{} is not registered in this ledger", id),
            })
    }

    /// Bind `left` and `right` with `payload`.
    ///
    /// Everything is validated first; on success the join is appended to the
    /// catalog and both sides see it before this returns. On failure nothing
    /// changes.
    pub fn associate(
        &mut self,
        left: EntityId,
        right: EntityId,
        payload: D::Payload,
    ) -> Result<JoinId> {
        self.expect_role(left, Role::Left)?;
        self.expect_role(right, Role::Right)?;
        self.check_payload(&payload)?;

        let id = JoinId::new();
        let sequence = self.catalog.append(id);
        self.joins.insert(
            id,
            Join {
                id,
                left,
                right,
                payload,
                sequence,
                created_at: Utc::now(),
            },
        );

        self.register_join(left, id)?;
        self.register_join(right, id)?;
        self.register_counterpart(left, right)?;
        self.register_counterpart(right, left)?;

        debug!(join = D::JOIN, %id, sequence, "registered join");
        Ok(id)
    }

    /// Create a new right-side entity and bind it to `left` in one step.
    /// Both the name and the payload are checked before either is created.
    pub fn associate_new_right(
        &mut self,
        left: EntityId,
        right_name: impl Into<String>,
        payload: D::Payload,
    ) -> Result<(EntityId, JoinId)> {
        let right_name = right_name.into();
        self.expect_role(left, Role::Left)?;
        self.check_name(Role::Right, &right_name)?;
        self.check_payload(&payload)?;

        let right = self.add_right(right_name)?;
        let join = self.associate(left, right, payload)?;
        Ok((right, join))
    }

    /// Append `join` to `entity`'s join sequence. The join must exist in this
    /// ledger and reference `entity`. Repeats of the same pair are kept.
    pub(crate) fn register_join(&mut self, entity: EntityId, join: JoinId) -> Result<()> {
        let references_entity = self
            .joins
            .get(&join)
            .map(|j| j.left == entity || j.right == entity)
            .ok_or_else(|| LedgerError::InvalidAssociation {
                expected: D::JOIN.to_string(),
                reason: format!("{} is not registered in this ledger", join),
            })?;

        if !references_entity {
            return Err(LedgerError::InvalidAssociation {
                expected: D::JOIN.to_string(),
                reason: format!("{} does not reference {}", join, entity),
            });
        }

        let primary = self
            .entities
            .get_mut(&entity)
            .ok_or_else(|| LedgerError::UnknownEntity(entity.to_string()))?;
        primary.joins.push(join);
        Ok(())
    }

    /// Add `other` to `entity`'s counterparts unless it is already there.
    /// Returns whether it was added.
    pub(crate) fn register_counterpart(&mut self, entity: EntityId, other: EntityId) -> Result<bool> {
        let expected = entity.role.opposite();
        self.expect_role(other, expected)?;

        let primary = self
            .entities
            .get_mut(&entity)
            .ok_or_else(|| LedgerError::UnknownEntity(entity.to_string()))?;

        if primary.counterparts.contains(&other) {
            return Ok(false);
        }
        primary.counterparts.push(other);
        Ok(true)
    }

    pub fn join(&self, id: JoinId) -> Result<&Join<D>> {
        self.joins
            .get(&id)
            .ok_or_else(|| LedgerError::UnknownEntity(id.to_string()))
    }

    /// Reassign a join's payload, validated like at construction.
    pub fn update_payload(&mut self, id: JoinId, payload: D::Payload) -> Result<()> {
        self.check_payload(&payload)?;

        let join = self
            .joins
            .get_mut(&id)
            .ok_or_else(|| LedgerError::UnknownEntity(id.to_string()))?;
        join.payload = payload;
        Ok(())
    }

    pub fn describe(&self, id: JoinId) -> Result<String> {
        let join = self.join(id)?;
        let left = self.name(join.left)?;
        let right = self.name(join.right)?;
        Ok(D::describe(left, right, &join.payload))
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Joins `id` takes part in, in construction order
    pub fn joins_of(&self, id: EntityId) -> Result<Vec<&Join<D>>> {
        let entity = self.entity(id)?;
        entity.joins.iter().map(|j| self.join(*j)).collect()
    }

    /// Distinct counterparts of `id`, in first-join order
    pub fn counterparts(&self, id: EntityId) -> Result<Vec<&Primary>> {
        let entity = self.entity(id)?;
        entity.counterparts.iter().map(|c| self.entity(*c)).collect()
    }

    pub fn join_count(&self, id: EntityId) -> Result<usize> {
        self.entity(id).map(Primary::join_count)
    }

    /// Number of joins shared with each counterpart, in first-join order.
    pub fn join_counts_by_counterpart(&self, id: EntityId) -> Result<Vec<(EntityId, usize)>> {
        let entity = self.entity(id)?;
        let mut counts: Vec<(EntityId, usize)> =
            entity.counterparts.iter().map(|c| (*c, 0)).collect();

        for join in self.joins_of(id)? {
            if let Some(other) = join.other_side(id) {
                if let Some(entry) = counts.iter_mut().find(|(c, _)| *c == other) {
                    entry.1 += 1;
                }
            }
        }

        Ok(counts)
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog<JoinId> {
        &self.catalog
    }

    /// Joins currently in the catalog, in construction order
    pub fn catalog_joins(&self) -> Vec<&Join<D>> {
        self.catalog
            .iter()
            .filter_map(|id| self.joins.get(id))
            .collect()
    }

    /// Running count of joins constructed since creation (or the last reset)
    pub fn count(&self) -> u64 {
        self.catalog.count()
    }

    /// Clear the catalog and its counter.
    ///
    /// Joins stay attached to their entities; only the catalog forgets them.
    pub fn reset_catalog(&mut self) {
        debug!(join = D::JOIN, cleared = self.catalog.len(), "catalog reset");
        self.catalog.reset();
    }
}

impl<D: Domain> Default for Ledger<D> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
