//! # Voucher Field Lock
//!
//! Once a voucher has been redeemed at least once, the fields that define
//! what the discount *is* (type, value, application) are frozen, because
//! changing them would rewrite the terms existing redemptions were made
//! under. Operational fields (usage limit, expiry, visibility, public flag)
//! stay editable, although visibility itself only moves through activation
//! and deactivation.
//!
//! Claiming a voucher (a user saving it to their account) does not count as
//! use; only `usedCount` drives the lock.

use std::str::FromStr;

use catalog_core::{CatalogError, EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::lifecycle::{LifecycleEntity, LifecycleManager};

// ─── Voucher ─────────────────────────────────────────────────────────

/// How the discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discount_value` is a percentage.
    Percentage,
    /// `discount_value` is an amount in minor currency units.
    FixedAmount,
}

/// What the discount applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    /// The whole order.
    Order,
    /// Specific products.
    Product,
    /// Shipping fees.
    Shipping,
}

/// Discount voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: EntityId,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub application_type: ApplicationType,
    /// Maximum redemptions; `None` is unlimited.
    #[serde(default)]
    pub usage_limit: Option<u32>,
    /// Redemptions so far.
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub expiry_date: Option<Timestamp>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_public: bool,
}

impl Voucher {
    /// A new, hidden, unused voucher.
    pub fn draft(
        id: EntityId,
        code: impl Into<String>,
        discount_type: DiscountType,
        discount_value: i64,
        application_type: ApplicationType,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            discount_type,
            discount_value,
            application_type,
            usage_limit: None,
            used_count: 0,
            expiry_date: None,
            is_active: false,
            is_public: false,
        }
    }

    /// Whether the voucher has been redeemed at least once.
    pub fn is_used(&self) -> bool {
        self.used_count > 0
    }
}

impl LifecycleEntity for Voucher {
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
        self.expiry_date
    }

    fn set_lifecycle(&mut self, is_active: bool, _priority: Option<i32>, end_date: Option<Timestamp>) {
        self.is_active = is_active;
        self.expiry_date = end_date;
    }
}

// ─── Fields ──────────────────────────────────────────────────────────

/// An editable voucher field, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoucherField {
    Code,
    DiscountType,
    DiscountValue,
    ApplicationType,
    UsageLimit,
    ExpiryDate,
    IsActive,
    IsPublic,
}

impl VoucherField {
    /// Every field, in wire order.
    pub const ALL: [VoucherField; 8] = [
        Self::Code,
        Self::DiscountType,
        Self::DiscountValue,
        Self::ApplicationType,
        Self::UsageLimit,
        Self::ExpiryDate,
        Self::IsActive,
        Self::IsPublic,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::DiscountType => "discountType",
            Self::DiscountValue => "discountValue",
            Self::ApplicationType => "applicationType",
            Self::UsageLimit => "usageLimit",
            Self::ExpiryDate => "expiryDate",
            Self::IsActive => "isActive",
            Self::IsPublic => "isPublic",
        }
    }

    /// Fields that stay editable on a live voucher (usage limit, expiry,
    /// visibility, public flag). Everything else is content.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::UsageLimit | Self::ExpiryDate | Self::IsActive | Self::IsPublic
        )
    }

    /// Fields frozen once the voucher has been used.
    pub fn locked_after_use(&self) -> bool {
        matches!(
            self,
            Self::DiscountType | Self::DiscountValue | Self::ApplicationType
        )
    }
}

impl std::fmt::Display for VoucherField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoucherField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| CatalogError::UnknownField(s.to_string()))
    }
}

// ─── Checks ──────────────────────────────────────────────────────────

/// Whether `field` may still be changed on `voucher`.
pub fn can_mutate_field(voucher: &Voucher, field: VoucherField) -> bool {
    !(voucher.is_used() && field.locked_after_use())
}

/// A requested voucher edit. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl VoucherChanges {
    /// Fields this edit actually changes relative to `current`.
    pub fn changed_fields(&self, current: &Voucher) -> Vec<VoucherField> {
        let mut fields = Vec::new();
        if self.code.as_ref().is_some_and(|v| *v != current.code) {
            fields.push(VoucherField::Code);
        }
        if self.discount_type.is_some_and(|v| v != current.discount_type) {
            fields.push(VoucherField::DiscountType);
        }
        if self.discount_value.is_some_and(|v| v != current.discount_value) {
            fields.push(VoucherField::DiscountValue);
        }
        if self.application_type.is_some_and(|v| v != current.application_type) {
            fields.push(VoucherField::ApplicationType);
        }
        if self.usage_limit.is_some_and(|v| Some(v) != current.usage_limit) {
            fields.push(VoucherField::UsageLimit);
        }
        if self.expiry_date.is_some_and(|v| Some(v) != current.expiry_date) {
            fields.push(VoucherField::ExpiryDate);
        }
        if self.is_active.is_some_and(|v| v != current.is_active) {
            fields.push(VoucherField::IsActive);
        }
        if self.is_public.is_some_and(|v| v != current.is_public) {
            fields.push(VoucherField::IsPublic);
        }
        fields
    }
}

/// Validate an edit against the field lock, the usage counter and the
/// current time.
///
/// Re-submitting a field with its current value is not a change and
/// passes. See [`check_update_at`].
pub fn check_update(voucher: &Voucher, changes: &VoucherChanges) -> Result<(), ValidationError> {
    check_update_at(voucher, changes, Timestamp::now())
}

/// [`check_update`] with an explicit decision time.
///
/// Checks, in order:
/// 1. `isActive` is not changed; visibility moves only through activation
///    and deactivation, which carry the priority and expiry rules.
/// 2. No field locked after use is changed.
/// 3. `usageLimit` is not below `usedCount`.
/// 4. A changed `expiryDate` is strictly after `now`.
pub fn check_update_at(
    voucher: &Voucher,
    changes: &VoucherChanges,
    now: Timestamp,
) -> Result<(), ValidationError> {
    let changed = changes.changed_fields(voucher);

    if let Some(requested) = changes.is_active.filter(|_| changed.contains(&VoucherField::IsActive)) {
        return Err(ValidationError::TransitionViaEdit {
            field: VoucherField::IsActive,
            requested,
        });
    }

    if let Some(field) = changed.iter().copied().find(|f| !can_mutate_field(voucher, *f)) {
        return Err(ValidationError::FieldLocked {
            field,
            used_count: voucher.used_count,
        });
    }

    if let Some(usage_limit) = changes.usage_limit {
        if usage_limit < voucher.used_count {
            return Err(ValidationError::UsageLimitBelowUsed {
                usage_limit,
                used_count: voucher.used_count,
            });
        }
    }

    if let Some(end_date) = changes.expiry_date.filter(|_| changed.contains(&VoucherField::ExpiryDate)) {
        if end_date <= now {
            return Err(ValidationError::ExpiryInPast { end_date, now });
        }
    }

    Ok(())
}

impl LifecycleManager<Voucher> {
    /// Whether `field` may still be changed on `voucher`.
    pub fn can_mutate_field(&self, voucher: &Voucher, field: VoucherField) -> bool {
        can_mutate_field(voucher, field)
    }

    /// Validate an edit; see [`check_update`].
    pub fn check_update(&self, voucher: &Voucher, changes: &VoucherChanges) -> Result<(), ValidationError> {
        check_update(voucher, changes)
    }

    /// Validate an edit at `now`; see [`check_update_at`].
    pub fn check_update_at(
        &self,
        voucher: &Voucher,
        changes: &VoucherChanges,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        check_update_at(voucher, changes, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LifecyclePolicy;

    fn used_voucher() -> Voucher {
        let mut v = Voucher::draft(
            EntityId(2),
            "WELCOME10",
            DiscountType::Percentage,
            10,
            ApplicationType::Order,
        );
        v.used_count = 10;
        v.usage_limit = Some(100);
        v
    }

    #[test]
    fn used_voucher_locks_discount_terms() {
        let m: LifecycleManager<Voucher> = LifecycleManager::new(LifecyclePolicy::VOUCHER);
        let v = used_voucher();
        assert!(!m.can_mutate_field(&v, VoucherField::DiscountValue));
        assert!(!m.can_mutate_field(&v, VoucherField::DiscountType));
        assert!(!m.can_mutate_field(&v, VoucherField::ApplicationType));
        assert!(m.can_mutate_field(&v, VoucherField::ExpiryDate));
        assert!(m.can_mutate_field(&v, VoucherField::UsageLimit));
        assert!(m.can_mutate_field(&v, VoucherField::IsPublic));
    }

    #[test]
    fn unused_voucher_is_fully_editable() {
        let mut v = used_voucher();
        v.used_count = 0;
        assert!(VoucherField::ALL.iter().all(|f| can_mutate_field(&v, *f)));
    }

    #[test]
    fn check_update_rejects_locked_change() {
        let v = used_voucher();
        let changes = VoucherChanges {
            discount_value: Some(20),
            ..Default::default()
        };
        let err = check_update(&v, &changes).unwrap_err();
        assert_eq!(err.code(), "field_locked");
        assert_eq!(
            err,
            ValidationError::FieldLocked {
                field: VoucherField::DiscountValue,
                used_count: 10
            }
        );
    }

    #[test]
    fn check_update_allows_unchanged_locked_value() {
        let v = used_voucher();
        let changes = VoucherChanges {
            discount_value: Some(10),
            usage_limit: Some(50),
            ..Default::default()
        };
        assert!(check_update(&v, &changes).is_ok());
    }

    #[test]
    fn check_update_rejects_limit_below_used() {
        let v = used_voucher();
        let changes = VoucherChanges {
            usage_limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            check_update(&v, &changes).unwrap_err().code(),
            "usage_limit_below_used"
        );
    }

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-01T09:00:00Z").unwrap()
    }

    #[test]
    fn check_update_rejects_expiry_not_in_future() {
        let v = used_voucher();
        for end_date in [now().plus_secs(-86_400), now()] {
            let changes = VoucherChanges {
                expiry_date: Some(end_date),
                ..Default::default()
            };
            assert_eq!(
                check_update_at(&v, &changes, now()).unwrap_err(),
                ValidationError::ExpiryInPast { end_date, now: now() }
            );
        }

        let later = VoucherChanges {
            expiry_date: Some(now().plus_secs(1)),
            ..Default::default()
        };
        assert!(check_update_at(&v, &later, now()).is_ok());
    }

    #[test]
    fn check_update_ignores_unchanged_past_expiry() {
        let mut v = used_voucher();
        v.expiry_date = Some(now().plus_secs(-60));
        let changes = VoucherChanges {
            expiry_date: v.expiry_date,
            usage_limit: Some(200),
            ..Default::default()
        };
        assert!(check_update_at(&v, &changes, now()).is_ok());
    }

    #[test]
    fn check_update_rejects_visibility_flip() {
        let mut v = used_voucher();
        let go_live = VoucherChanges {
            is_active: Some(true),
            expiry_date: Some(now().plus_secs(-86_400)),
            ..Default::default()
        };
        assert_eq!(
            check_update_at(&v, &go_live, now()).unwrap_err(),
            ValidationError::TransitionViaEdit {
                field: VoucherField::IsActive,
                requested: true
            }
        );

        v.is_active = true;
        v.expiry_date = Some(now().plus_secs(3_600));
        let hide = VoucherChanges {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(
            check_update_at(&v, &hide, now()).unwrap_err().code(),
            "transition_via_edit"
        );

        let same = VoucherChanges {
            is_active: Some(true),
            is_public: Some(true),
            ..Default::default()
        };
        assert!(check_update_at(&v, &same, now()).is_ok());
    }

    #[test]
    fn operational_fields_never_lock() {
        for f in VoucherField::ALL {
            assert!(!(f.is_operational() && f.locked_after_use()), "{f}");
        }
        assert!(!VoucherField::Code.is_operational());
    }

    #[test]
    fn field_parsing_accepts_wire_and_snake_names() {
        assert_eq!("discountValue".parse::<VoucherField>().unwrap(), VoucherField::DiscountValue);
        assert_eq!("expiry_date".parse::<VoucherField>().unwrap(), VoucherField::ExpiryDate);
        assert!("colour".parse::<VoucherField>().is_err());
    }

    #[test]
    fn voucher_from_backend_json() {
        let v: Voucher = serde_json::from_value(serde_json::json!({
            "id": 2,
            "code": "SHIPFREE",
            "discountType": "FIXED_AMOUNT",
            "discountValue": 3000,
            "applicationType": "SHIPPING",
            "usageLimit": 500,
            "usedCount": 12,
            "expiryDate": "2026-12-31T23:59:59Z",
            "isActive": true,
            "isPublic": true
        }))
        .unwrap();
        assert!(v.is_used());
        assert_eq!(v.end_date(), v.expiry_date);
        assert_eq!(v.application_type, ApplicationType::Shipping);
    }

    #[test]
    fn deactivating_voucher_clears_expiry() {
        let m: LifecycleManager<Voucher> = LifecycleManager::new(LifecyclePolicy::VOUCHER);
        let mut v = used_voucher();
        v.is_active = true;
        v.expiry_date = Some(Timestamp::now().plus_secs(3_600));
        m.plan_deactivate(&v).apply_to(&mut v);
        assert!(!v.is_active);
        assert_eq!(v.expiry_date, None);
    }
}
