// ❌ Ledger Errors - every way building or querying a ledger can fail

use thiserror::Error;

/// Errors raised while building or querying a ledger.
///
/// Every validation failure is reported before any state is touched, so a
/// returned error always means the ledger is unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A name (or other identity-like text) failed its rule.
    #[error("invalid {role} `{value}`: {reason}")]
    InvalidIdentity {
        role: String,
        value: String,
        reason: String,
    },

    /// A bounded value fell outside its range or was not a finite number.
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// A join referenced an entity of the wrong role, or one this ledger does not own.
    #[error("invalid association, expected {expected}: {reason}")]
    InvalidAssociation { expected: String, reason: String },

    /// An aggregate that divides by the join count was asked of an entity with no joins.
    #[error("`{name}` has no joins to aggregate")]
    EmptyAggregate { name: String },

    /// Lookup by id failed.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Configuration could not be applied.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// Short, stable name of the failure kind (used in seed summaries and logs).
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::InvalidIdentity { .. } => "invalid_identity",
            LedgerError::InvalidRange { .. } => "invalid_range",
            LedgerError::InvalidAssociation { .. } => "invalid_association",
            LedgerError::EmptyAggregate { .. } => "empty_aggregate",
            LedgerError::UnknownEntity(_) => "unknown_entity",
            LedgerError::Config(_) => "config",
            LedgerError::Io(_) => "io",
            LedgerError::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
