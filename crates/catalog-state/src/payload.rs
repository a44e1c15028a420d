//! # Update Payload
//!
//! The partial entity sent to the backend update endpoint:
//! `{ id, isActive, priority?, <endDateField>? }`.
//!
//! Which dependent fields appear, and under which name, depends on the
//! kind's policy. A field the kind tracks is always present, as `null`
//! when cleared, so the backend drops the stale value.

use catalog_core::{EntityId, Timestamp};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::policy::LifecyclePolicy;

/// Partial update body for a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecyclePayload {
    /// Target entity.
    pub id: EntityId,
    /// New visibility flag.
    pub is_active: bool,
    /// `Some(value)` when the kind is ranked; the inner `None` clears it.
    pub priority: Option<Option<i32>>,
    /// `(wire name, value)` when the kind tracks an end date.
    pub end_date: Option<(&'static str, Option<Timestamp>)>,
}

impl LifecyclePayload {
    /// Build a payload shaped by `policy`.
    pub fn new(
        policy: &LifecyclePolicy,
        id: EntityId,
        is_active: bool,
        priority: Option<i32>,
        end_date: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            is_active,
            priority: policy.priority.map(|_| priority),
            end_date: policy.end_date_field.map(|field| (field, end_date)),
        }
    }
}

impl Serialize for LifecyclePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + usize::from(self.priority.is_some()) + usize::from(self.end_date.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("isActive", &self.is_active)?;
        if let Some(priority) = &self.priority {
            map.serialize_entry("priority", priority)?;
        }
        if let Some((field, value)) = &self.end_date {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn announcement_payload_uses_end_date() {
        let end = Timestamp::parse("2026-05-01T00:00:00Z").unwrap();
        let p = LifecyclePayload::new(
            &LifecyclePolicy::ANNOUNCEMENT,
            EntityId(5),
            true,
            Some(3),
            Some(end),
        );
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"id": 5, "isActive": true, "priority": 3, "endDate": "2026-05-01T00:00:00Z"})
        );
    }

    #[test]
    fn voucher_payload_uses_expiry_date_and_omits_priority() {
        let p = LifecyclePayload::new(&LifecyclePolicy::VOUCHER, EntityId(2), false, None, None);
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"id": 2, "isActive": false, "expiryDate": null})
        );
    }

    #[test]
    fn category_payload_is_flag_only() {
        let p = LifecyclePayload::new(&LifecyclePolicy::CATEGORY, EntityId(4), true, None, None);
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"id": 4, "isActive": true})
        );
    }
}
