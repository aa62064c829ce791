//! # Domain Types
//!
//! Catalog and address types shared by the cart and the order handoff.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌───────────────────┐   ┌───────────────────┐   ┌──────────────────┐  │
//! │  │  ProductRecord    │   │ BulkDiscountTier  │   │    Address       │  │
//! │  │  ───────────────  │   │ ────────────────  │   │  ──────────────  │  │
//! │  │  id               │   │ min_quantity      │   │  name, street    │  │
//! │  │  price_cents      │──►│ discount_bps      │   │  city, postal    │  │
//! │  │  bulk_discounts   │   │ 500 = 5%          │   │  country         │  │
//! │  └───────────────────┘   └───────────────────┘   └──────────────────┘  │
//! │           │                                                             │
//! │           ▼  CartLine::from_product                                     │
//! │       cart::CartLine                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product records come from the catalog service; this crate only reads them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percent};

// =============================================================================
// Bulk Discount Tier
// =============================================================================

/// One step of a product's bulk-discount schedule.
///
/// Buying at least `min_quantity` units earns `discount_bps` off the unit
/// price of every unit on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BulkDiscountTier {
    /// Smallest line quantity that qualifies.
    pub min_quantity: i64,

    /// Discount in basis points (500 = 5%).
    pub discount_bps: u32,
}

impl BulkDiscountTier {
    pub const fn new(min_quantity: i64, discount: Percent) -> Self {
        BulkDiscountTier {
            min_quantity,
            discount_bps: discount.bps(),
        }
    }

    /// Returns the discount as a [`Percent`].
    #[inline]
    pub const fn discount(&self) -> Percent {
        Percent::from_bps(self.discount_bps)
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// A product as supplied by the catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Stable product identifier.
    pub id: String,

    /// Display name ("Roma Tomatoes").
    pub name: String,

    /// Catalog category ("Vegetables", "Citrus", ...).
    pub category: String,

    /// Selling unit ("case", "lb", "flat").
    #[serde(default)]
    pub unit: Option<String>,

    /// Price per unit in cents.
    pub price_cents: i64,

    /// Bulk-discount schedule, in any order.
    #[serde(default)]
    pub bulk_discounts: Vec<BulkDiscountTier>,

    /// Inactive products stay in the catalog but cannot be ordered.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductRecord {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Address
// =============================================================================

/// A billing or shipping address attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Recipient or business name.
    pub name: String,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

fn default_country() -> String {
    "US".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_tier_round_trips_percent() {
        let tier = BulkDiscountTier::new(40, Percent::from_whole(15));
        assert_eq!(tier.discount_bps, 1500);
        assert_eq!(tier.discount(), Percent::from_whole(15));
    }

    #[test]
    fn test_product_record_defaults() {
        let json = r#"{"id":"p1","name":"Roma Tomatoes","category":"Vegetables","priceCents":1000}"#;
        let product: ProductRecord = serde_json::from_str(json).unwrap();
        assert!(product.is_active);
        assert!(product.bulk_discounts.is_empty());
        assert_eq!(product.unit, None);
        assert_eq!(product.price(), Money::from_cents(1000));
    }

    #[test]
    fn test_address_defaults_country() {
        let json = r#"{"name":"Green Grocer","street":"1 Market St","city":"Fresno","postalCode":"93721"}"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(address.country, "US");
        assert_eq!(address.region, None);
    }
}
