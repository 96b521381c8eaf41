//! # Domain Types
//!
//! Core domain types used throughout Lagoon POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐   ┌──────────────────┐   ┌──────────────────┐  │
//! │  │    Product     │   │  SalesDocument   │   │      Order       │  │
//! │  │  ────────────  │   │  ──────────────  │   │  ──────────────  │  │
//! │  │  id (UUID)     │   │  id (UUID)       │   │  order_code      │  │
//! │  │  item_code     │   │  group_code      │   │  price_cents     │  │
//! │  │  stock         │   │  orders[]        │   │  guide/company/  │  │
//! │  │  price_cents   │   └──────────────────┘   │  discount splits │  │
//! │  └────────────────┘                          │  boatmen[]       │  │
//! │                                              │  less / gift     │  │
//! │  A *group* is every SalesDocument sharing    └──────────────────┘  │
//! │  one group_code; its orders share the less and gift pools.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (item_code, group_code, order_code) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15% (a typical guide commission)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, unique per catalog (e.g. "MASK-SNKL-01").
    pub item_code: String,

    /// Display name shown on orders and receipts.
    pub item_name: String,

    /// Brand the item is sold under.
    pub brand_name: String,

    /// Category this item belongs to.
    pub category_code: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Current stock level. Never negative; order creation rejects any
    /// line that would drive it below zero.
    pub stock: i64,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    /// Who last changed this record (attribution only).
    pub updated_by: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Commission Splits
// =============================================================================

/// The guide's cut of an order: a percentage of the order price plus the
/// resolved payout amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideSplit {
    pub name: String,
    pub rate_bps: u32,
    pub amount_cents: i64,
}

/// The company's cut of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySplit {
    pub rate_bps: u32,
    pub amount_cents: i64,
}

/// Discount applied to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSplit {
    pub rate_bps: u32,
    pub amount_cents: i64,
}

/// One boatman's share of an order. Every boatman on an order receives
/// the same per-order amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatmanShare {
    pub name: String,
    pub rate_bps: u32,
    pub cost_amount_cents: i64,
}

// =============================================================================
// Order
// =============================================================================

/// A product line on an order, with the product name snapshotted at the
/// time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
}

/// One sale transaction within a group.
///
/// Carries the price, the commission splits, and this order's share of the
/// group's `less` and `gift` deduction pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_code: String,
    pub guide: GuideSplit,
    pub company: CompanySplit,
    pub discount: DiscountSplit,
    pub boatmen: Vec<BoatmanShare>,
    pub lines: Vec<OrderLine>,
    /// Order price in cents, the base for all percentage calculations.
    pub price_cents: i64,
    /// Sum of line-item amounts in cents.
    pub item_wise_total_cents: i64,
    pub category_code: String,
    pub exotic: bool,
    /// This order's share of the group's "less" pool. Non-negative on
    /// entry; a redistribution residual can leave the last order's
    /// share slightly negative.
    pub less_cents: i64,
    /// This order's share of the group's "gift" pool. Same signedness
    /// as `less_cents`.
    pub gift_cents: i64,
    /// Caller-supplied, not derived from identity.
    pub demonstrator_name: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Total boatman payout for this order (same amount per boatman).
    pub fn boatman_payout_cents(&self) -> i64 {
        self.boatmen
            .iter()
            .map(|b| b.cost_amount_cents)
            .sum()
    }
}

// =============================================================================
// Sales Document
// =============================================================================

/// A persisted batch of orders created by one `create_order` call.
///
/// A logical group (one customer visit) may span several documents: each
/// call appends a new document under the same `group_code`. Settlement
/// operations always load the whole group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesDocument {
    pub id: String,
    pub group_code: String,
    pub orders: Vec<Order>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Received Stock
// =============================================================================

/// A stock-receipt record. Creating one increments the matching
/// product's stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedStock {
    pub id: String,
    pub received_product_id: String,
    pub received_product_name: String,
    pub category: String,
    pub qty: i64,
    pub remark: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Caller Identity
// =============================================================================

/// The request caller, supplied by an upstream auth layer.
///
/// Used only for attribution fields (`created_by`, `updated_by`); the
/// engine never derives business data from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caller {
    pub id: String,
    pub display_name: String,
    pub role: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p1".to_string(),
            item_code: "MASK-01".to_string(),
            item_name: "Snorkel Mask".to_string(),
            brand_name: "DeepSee".to_string(),
            category_code: "DIVE".to_string(),
            price_cents: 45_000,
            stock: 5,
            is_active: true,
            updated_by: "seed".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(1500);
        assert_eq!(rate.bps(), 1500);
        assert!((rate.percentage() - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(Rate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_product_has_stock() {
        let product = sample_product();
        assert!(product.has_stock(5));
        assert!(!product.has_stock(6));
    }

    #[test]
    fn test_boatman_payout() {
        let now = Utc::now();
        let order = Order {
            id: "o1".to_string(),
            order_code: "ORD-1".to_string(),
            guide: GuideSplit {
                name: "Nimal".to_string(),
                rate_bps: 1500,
                amount_cents: 0,
            },
            company: CompanySplit {
                rate_bps: 1000,
                amount_cents: 0,
            },
            discount: DiscountSplit {
                rate_bps: 0,
                amount_cents: 0,
            },
            boatmen: vec![
                BoatmanShare {
                    name: "Sunil".to_string(),
                    rate_bps: 500,
                    cost_amount_cents: 250,
                },
                BoatmanShare {
                    name: "Kamal".to_string(),
                    rate_bps: 500,
                    cost_amount_cents: 250,
                },
            ],
            lines: vec![],
            price_cents: 5000,
            item_wise_total_cents: 5000,
            category_code: "DIVE".to_string(),
            exotic: false,
            less_cents: 0,
            gift_cents: 0,
            demonstrator_name: "Ruwan".to_string(),
            created_at: now,
        };
        assert_eq!(order.boatman_payout_cents(), 500);
    }
}
