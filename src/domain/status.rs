//! Status reference data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical status names seeded at startup.
pub struct StatusName;

impl StatusName {
    pub const CREATED: &'static str = "created";
    pub const PENDING: &'static str = "pending";
    pub const COMPLETED: &'static str = "completed";
    pub const DELETED: &'static str = "deleted";

    pub const ALL: [&'static str; 4] = [
        Self::CREATED,
        Self::PENDING,
        Self::COMPLETED,
        Self::DELETED,
    ];
}

/// A named state a transaction points to.
///
/// `Status::default()` is the zero value a transaction carries when its
/// status name could not be resolved against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

impl Status {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Status carrying only a name, as supplied by callers of `update`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
        }
    }

    /// True when this status refers to an actual catalog row.
    pub fn is_resolved(&self) -> bool {
        !self.id.is_nil()
    }

    /// Foreign key value to persist; the zero value is stored as NULL.
    pub fn reference(&self) -> Option<Uuid> {
        self.is_resolved().then_some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_unresolved() {
        let status = Status::default();
        assert!(!status.is_resolved());
        assert_eq!(status.reference(), None);
        assert!(status.name.is_empty());
    }

    #[test]
    fn test_named_status_has_no_reference() {
        let status = Status::named(StatusName::PENDING);
        assert_eq!(status.name, "pending");
        assert_eq!(status.reference(), None);
    }

    #[test]
    fn test_resolved_status_reference() {
        let id = Uuid::new_v4();
        let status = Status::new(id, StatusName::CREATED);
        assert!(status.is_resolved());
        assert_eq!(status.reference(), Some(id));
    }
}
