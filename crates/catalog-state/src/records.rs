//! # Catalog Records
//!
//! Concrete entity shapes as the backend returns them (camelCase JSON).
//! Each implements [`LifecycleEntity`] so one manager type serves all kinds.

use catalog_core::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::lifecycle::LifecycleEntity;

/// Kind-agnostic lifecycle view of any catalog entity.
///
/// Deserializes from any of the four entity payloads; content fields are
/// ignored and a voucher's `expiryDate` is read as the end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRecord {
    /// Backend identifier.
    pub id: EntityId,
    /// Visibility flag.
    #[serde(default)]
    pub is_active: bool,
    /// Rank among active siblings.
    #[serde(default)]
    pub priority: Option<i32>,
    /// End or expiry date.
    #[serde(default, alias = "expiryDate")]
    pub end_date: Option<Timestamp>,
}

impl LifecycleRecord {
    /// An inactive record with no dependent fields.
    pub fn inactive(id: i64) -> Self {
        Self {
            id: EntityId(id),
            is_active: false,
            priority: None,
            end_date: None,
        }
    }

    /// An active record.
    pub fn active(id: i64, priority: i32, end_date: Option<Timestamp>) -> Self {
        Self {
            id: EntityId(id),
            is_active: true,
            priority: Some(priority),
            end_date,
        }
    }
}

impl LifecycleEntity for LifecycleRecord {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn end_date(&self) -> Option<Timestamp> {
        self.end_date
    }

    fn set_lifecycle(&mut self, is_active: bool, priority: Option<i32>, end_date: Option<Timestamp>) {
        self.is_active = is_active;
        self.priority = priority;
        self.end_date = end_date;
    }
}

/// Storefront announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
}

impl Announcement {
    /// A new, hidden announcement.
    pub fn draft(id: EntityId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            is_active: false,
            priority: None,
            end_date: None,
        }
    }
}

/// Sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    /// Price in minor currency units.
    pub price: i64,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub priority: Option<i32>,
}

impl Product {
    /// A new, hidden product.
    pub fn draft(id: EntityId, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category_id: None,
            is_active: false,
            priority: None,
        }
    }
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Category {
    /// Categories have no forced initial visibility.
    pub fn new(id: EntityId, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_active,
        }
    }
}

impl LifecycleEntity for Announcement {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn end_date(&self) -> Option<Timestamp> {
        self.end_date
    }

    fn set_lifecycle(&mut self, is_active: bool, priority: Option<i32>, end_date: Option<Timestamp>) {
        self.is_active = is_active;
        self.priority = priority;
        self.end_date = end_date;
    }
}

impl LifecycleEntity for Product {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn end_date(&self) -> Option<Timestamp> {
        None
    }

    fn set_lifecycle(&mut self, is_active: bool, priority: Option<i32>, _end_date: Option<Timestamp>) {
        self.is_active = is_active;
        self.priority = priority;
    }
}

impl LifecycleEntity for Category {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn priority(&self) -> Option<i32> {
        None
    }

    fn end_date(&self) -> Option<Timestamp> {
        None
    }

    fn set_lifecycle(&mut self, is_active: bool, _priority: Option<i32>, _end_date: Option<Timestamp>) {
        self.is_active = is_active;
    }
}
