//! # Entity Kinds
//!
//! The four catalog collections that carry an active/inactive lifecycle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A lifecycle-managed catalog collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Storefront announcement banner.
    Announcement,
    /// Sellable product.
    Product,
    /// Product category.
    Category,
    /// Discount voucher.
    Voucher,
}

impl EntityKind {
    /// All kinds, in declaration order.
    pub const ALL: [EntityKind; 4] = [
        Self::Announcement,
        Self::Product,
        Self::Category,
        Self::Voucher,
    ];

    /// REST collection segment for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Announcement => "announcements",
            Self::Product => "products",
            Self::Category => "categories",
            Self::Voucher => "vouchers",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Announcement => "ANNOUNCEMENT",
            Self::Product => "PRODUCT",
            Self::Category => "CATEGORY",
            Self::Voucher => "VOUCHER",
        };
        f.write_str(s)
    }
}

impl FromStr for EntityKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "announcement" | "announcements" => Ok(Self::Announcement),
            "product" | "products" => Ok(Self::Product),
            "category" | "categories" => Ok(Self::Category),
            "voucher" | "vouchers" => Ok(Self::Voucher),
            _ => Err(CatalogError::UnknownEntityKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_accepts_plural() {
        assert_eq!("Voucher".parse::<EntityKind>().unwrap(), EntityKind::Voucher);
        assert_eq!("CATEGORIES".parse::<EntityKind>().unwrap(), EntityKind::Category);
        assert_eq!(" product ".parse::<EntityKind>().unwrap(), EntityKind::Product);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "coupon".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, CatalogError::UnknownEntityKind("coupon".into()));
    }

    #[test]
    fn collection_segments() {
        let segments: Vec<_> = EntityKind::ALL.iter().map(|k| k.collection()).collect();
        assert_eq!(segments, ["announcements", "products", "categories", "vouchers"]);
    }

    #[test]
    fn display_and_serde() {
        assert_eq!(EntityKind::Announcement.to_string(), "ANNOUNCEMENT");
        assert_eq!(serde_json::to_string(&EntityKind::Category).unwrap(), "\"category\"");
    }
}
