//! # Request and Outcome Types
//!
//! The shapes crossing the engine's boundary. Commission inputs on a new
//! order are stored as provided by the caller; recomputation only happens
//! through [`crate::engine::SettlementEngine::recalculate`].

use serde::{Deserialize, Serialize};

use lagoon_core::{BoatmanShare, CompanySplit, DiscountSplit, GuideSplit, Order, SalesDocument};

// =============================================================================
// Create Order
// =============================================================================

/// One requested product line: quantity only, the product name is
/// resolved (and snapshotted) from live inventory during the commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Input for `create_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub group_code: String,
    pub order_code: String,
    pub lines: Vec<LineRequest>,

    /// Order price in cents; the base for later recalculations.
    pub price_cents: i64,
    pub item_wise_total_cents: i64,
    pub category_code: String,
    #[serde(default)]
    pub exotic: bool,

    /// Initial share of the group's "less" pool.
    #[serde(default)]
    pub less_cents: i64,
    /// Initial share of the group's "gift" pool.
    #[serde(default)]
    pub gift_cents: i64,

    /// Caller-supplied, not derived from the bearer identity.
    pub demonstrator_name: String,

    // Commission inputs, stored as provided (not recomputed at creation)
    pub guide: GuideSplit,
    pub company: CompanySplit,
    pub discount: DiscountSplit,
    pub boatmen: Vec<BoatmanShare>,
}

// =============================================================================
// Recalculation Outcome
// =============================================================================

/// Result of a group-wide recalculation.
#[derive(Debug, Clone, Serialize)]
pub struct RecalculationOutcome {
    /// Every document of the group, with the recalculated orders.
    pub documents: Vec<SalesDocument>,

    /// "less" pool total before the deduction.
    pub original_less_cents: i64,
    /// "less" pool total after the deduction; the per-order shares sum
    /// to exactly this.
    pub remaining_less_cents: i64,

    /// "gift" pool total before the deduction.
    pub original_gift_cents: i64,
    /// "gift" pool total after the deduction.
    pub remaining_gift_cents: i64,

    /// Group-wide guide payout after deductions.
    pub guide_total_cents: i64,
    /// Group-wide boatman payout after deductions.
    pub boatman_total_cents: i64,

    pub orders_updated: usize,
}

// =============================================================================
// Price Reduction
// =============================================================================

/// Result of `reduce_price`: the adjusted order and where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReduction {
    pub group_code: String,
    pub document_id: String,
    pub previous_price_cents: i64,
    pub new_price_cents: i64,
    pub order: Order,
}

// =============================================================================
// Receive Stock
// =============================================================================

/// Input for `receive_stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveStockRequest {
    pub product_id: String,
    pub qty: i64,
    #[serde(default)]
    pub remark: String,
}
