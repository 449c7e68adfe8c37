//! Transaction domain entity.
//! Framework-agnostic representation of a recorded financial transaction.

use bigdecimal::BigDecimal;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Status;

/// Domain entity representing a transaction.
///
/// The serialized form doubles as the document stored in the mirror, so the
/// identifier is written under `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub status: Status,
    pub value: BigDecimal,
}

impl Transaction {
    /// A not-yet-persisted transaction. The id stays nil until the relational
    /// store assigns one.
    pub fn new(value: BigDecimal, status: Status) -> Self {
        let now = now();
        Self {
            id: Uuid::nil(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
            status,
            value,
        }
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new(BigDecimal::from(0), Status::default())
    }
}

/// Current time at the precision Postgres keeps (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
