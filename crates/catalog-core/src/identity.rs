//! # Entity Identifiers
//!
//! The backend assigns every catalog entity an integer key at creation.
//! The key is opaque to this workspace and never changes afterwards.

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Wrap a raw backend key.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw backend key.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        let id = EntityId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: EntityId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, EntityId(7));
    }

    #[test]
    fn display_is_raw_key() {
        assert_eq!(EntityId::from(5).to_string(), "5");
    }
}
