//! # Commission Recalculation
//!
//! Pure per-order commission math for the settlement engine.
//!
//! ## Calculation Base
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Recalculating One Order                            │
//! │                                                                     │
//! │  base = order.price                                                 │
//! │                                                                     │
//! │  discount = base × rate        (custom rate or explicit override)   │
//! │  company  = base × rate        (custom rate, override amount wins)  │
//! │  guide    = base × rate - less_from_guide - gift_from_guide         │
//! │  boatman  = base × rate - less_from_boatman - gift_from_boatman     │
//! │                                                                     │
//! │  Every deduction floors at zero. Every boatman on an order          │
//! │  receives the same per-order amount.                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pool redistribution (`less`/`gift` shares) is a separate concern; see
//! [`crate::redistribution`].

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Order, Rate};

// =============================================================================
// Recalculate Request
// =============================================================================

/// Optional overrides for a group-wide recalculation.
///
/// `None` means "keep the order's stored rate". Deduction amounts default
/// to zero and only apply when positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecalculateRequest {
    /// Replaces every order's discount rate and recomputes the amount.
    pub custom_discount_rate: Option<Rate>,
    /// Explicit discount amount; used only when no custom rate is given.
    pub discount_amount_override: Option<Money>,

    /// Replaces every order's company rate.
    pub custom_company_rate: Option<Rate>,
    /// Explicit company amount; wins over the computed amount.
    pub company_amount_override: Option<Money>,

    /// Replaces every order's guide rate.
    pub custom_guide_rate: Option<Rate>,
    /// Replaces every boatman's rate.
    pub custom_boatman_rate: Option<Rate>,

    /// Deduction taken from each order's guide payout.
    pub less_from_guide: Money,
    /// Deduction taken from each order's boatman payout.
    pub less_from_boatman: Money,
    /// Gift deduction taken from each order's guide payout.
    pub gift_from_guide: Money,
    /// Gift deduction taken from each order's boatman payout.
    pub gift_from_boatman: Money,
}

impl RecalculateRequest {
    /// Total "less" deduction requested against the group pool.
    pub fn total_less_deduction(&self) -> Money {
        self.less_from_guide + self.less_from_boatman
    }

    /// Total "gift" deduction requested against the group pool.
    pub fn total_gift_deduction(&self) -> Money {
        self.gift_from_guide + self.gift_from_boatman
    }
}

// =============================================================================
// Per-Order Outcome
// =============================================================================

/// Amounts produced by recalculating one order, accumulated by the engine
/// into group-wide reporting totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionOutcome {
    /// The guide's payout for this order after deductions.
    pub guide_amount: Money,
    /// Total boatman payout for this order (per-boatman amount × count).
    pub boatman_payout: Money,
}

// =============================================================================
// Recalculation
// =============================================================================

/// Recalculates the commission splits of one order in place.
///
/// The stored order price is the base for every percentage. Stored rates
/// are only replaced when the request carries a custom rate; explicit
/// amount overrides never touch the stored rate.
pub fn apply_commissions(order: &mut Order, request: &RecalculateRequest) -> CommissionOutcome {
    let base = order.price();

    // 1. Discount: a custom rate recomputes the amount; otherwise an
    //    explicit override amount replaces it outright.
    if let Some(rate) = request.custom_discount_rate {
        order.discount.rate_bps = rate.bps();
        order.discount.amount_cents = base.apply_rate(rate).cents();
    } else if let Some(amount) = request.discount_amount_override {
        order.discount.amount_cents = amount.cents();
    }

    // 2. Company: computed from the custom or stored rate, with an
    //    explicit override amount winning over the computation.
    let company_rate = request
        .custom_company_rate
        .unwrap_or(Rate::from_bps(order.company.rate_bps));
    let mut company_amount = base.apply_rate(company_rate);
    if let Some(amount) = request.company_amount_override {
        company_amount = amount;
    }
    order.company.amount_cents = company_amount.cents();
    if let Some(rate) = request.custom_company_rate {
        order.company.rate_bps = rate.bps();
    }

    // 3. Guide: computed, then reduced (floored at zero) by the "less"
    //    deduction first and the "gift" deduction second.
    let guide_rate = request
        .custom_guide_rate
        .unwrap_or(Rate::from_bps(order.guide.rate_bps));
    let mut guide_amount = base.apply_rate(guide_rate);
    if request.less_from_guide.is_positive() {
        guide_amount = guide_amount.deduct_floor_zero(request.less_from_guide);
    }
    if request.gift_from_guide.is_positive() {
        guide_amount = guide_amount.deduct_floor_zero(request.gift_from_guide);
    }
    order.guide.amount_cents = guide_amount.cents();
    if let Some(rate) = request.custom_guide_rate {
        order.guide.rate_bps = rate.bps();
    }

    // 4. Boatmen: one shared per-order amount. The stored rate of the
    //    first boatman stands in for the whole crew when no custom rate
    //    is given.
    let boatman_rate = request.custom_boatman_rate.unwrap_or_else(|| {
        order
            .boatmen
            .first()
            .map(|b| Rate::from_bps(b.rate_bps))
            .unwrap_or(Rate::zero())
    });
    let mut boatman_amount = base.apply_rate(boatman_rate);
    if request.less_from_boatman.is_positive() {
        boatman_amount = boatman_amount.deduct_floor_zero(request.less_from_boatman);
    }
    if request.gift_from_boatman.is_positive() {
        boatman_amount = boatman_amount.deduct_floor_zero(request.gift_from_boatman);
    }
    for boatman in &mut order.boatmen {
        boatman.cost_amount_cents = boatman_amount.cents();
        if let Some(rate) = request.custom_boatman_rate {
            boatman.rate_bps = rate.bps();
        }
    }

    let boatman_count = order.boatmen.len() as i64;
    CommissionOutcome {
        guide_amount,
        boatman_payout: Money::from_cents(boatman_amount.cents() * boatman_count),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoatmanShare, CompanySplit, DiscountSplit, GuideSplit};
    use chrono::Utc;

    fn order_with_price(price_cents: i64) -> Order {
        Order {
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
                rate_bps: 500,
                amount_cents: 0,
            },
            boatmen: vec![
                BoatmanShare {
                    name: "Sunil".to_string(),
                    rate_bps: 800,
                    cost_amount_cents: 0,
                },
                BoatmanShare {
                    name: "Kamal".to_string(),
                    rate_bps: 800,
                    cost_amount_cents: 0,
                },
            ],
            lines: vec![],
            price_cents,
            item_wise_total_cents: price_cents,
            category_code: "DIVE".to_string(),
            exotic: false,
            less_cents: 0,
            gift_cents: 0,
            demonstrator_name: "Ruwan".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_rates_used_without_overrides() {
        let mut order = order_with_price(10_000);
        let outcome = apply_commissions(&mut order, &RecalculateRequest::default());

        // guide 15%, company 10%, boatman 8% of 10_000
        assert_eq!(order.guide.amount_cents, 1500);
        assert_eq!(order.company.amount_cents, 1000);
        assert_eq!(order.boatmen[0].cost_amount_cents, 800);
        assert_eq!(order.boatmen[1].cost_amount_cents, 800);
        // discount untouched without a custom rate or override
        assert_eq!(order.discount.amount_cents, 0);

        assert_eq!(outcome.guide_amount.cents(), 1500);
        assert_eq!(outcome.boatman_payout.cents(), 1600);
    }

    #[test]
    fn test_custom_rates_replace_stored_rates() {
        let mut order = order_with_price(10_000);
        let request = RecalculateRequest {
            custom_discount_rate: Some(Rate::from_bps(1000)),
            custom_company_rate: Some(Rate::from_bps(2000)),
            custom_guide_rate: Some(Rate::from_bps(500)),
            custom_boatman_rate: Some(Rate::from_bps(250)),
            ..Default::default()
        };
        apply_commissions(&mut order, &request);

        assert_eq!(order.discount.rate_bps, 1000);
        assert_eq!(order.discount.amount_cents, 1000);
        assert_eq!(order.company.rate_bps, 2000);
        assert_eq!(order.company.amount_cents, 2000);
        assert_eq!(order.guide.rate_bps, 500);
        assert_eq!(order.guide.amount_cents, 500);
        assert_eq!(order.boatmen[0].rate_bps, 250);
        assert_eq!(order.boatmen[0].cost_amount_cents, 250);
    }

    #[test]
    fn test_amount_overrides_win_without_touching_rates() {
        let mut order = order_with_price(10_000);
        let request = RecalculateRequest {
            discount_amount_override: Some(Money::from_cents(777)),
            company_amount_override: Some(Money::from_cents(888)),
            ..Default::default()
        };
        apply_commissions(&mut order, &request);

        assert_eq!(order.discount.amount_cents, 777);
        assert_eq!(order.discount.rate_bps, 500);
        assert_eq!(order.company.amount_cents, 888);
        assert_eq!(order.company.rate_bps, 1000);
    }

    #[test]
    fn test_custom_discount_rate_wins_over_override_amount() {
        let mut order = order_with_price(10_000);
        let request = RecalculateRequest {
            custom_discount_rate: Some(Rate::from_bps(1000)),
            discount_amount_override: Some(Money::from_cents(777)),
            ..Default::default()
        };
        apply_commissions(&mut order, &request);

        assert_eq!(order.discount.amount_cents, 1000);
    }

    #[test]
    fn test_deductions_floor_at_zero() {
        let mut order = order_with_price(10_000);
        let request = RecalculateRequest {
            less_from_guide: Money::from_cents(1000),
            gift_from_guide: Money::from_cents(1000),
            less_from_boatman: Money::from_cents(2000),
            ..Default::default()
        };
        let outcome = apply_commissions(&mut order, &request);

        // guide: 1500 - 1000 - 1000 floors at 0 after the second deduction
        assert_eq!(order.guide.amount_cents, 0);
        // boatman: 800 - 2000 floors at 0
        assert_eq!(order.boatmen[0].cost_amount_cents, 0);
        assert_eq!(outcome.guide_amount.cents(), 0);
        assert_eq!(outcome.boatman_payout.cents(), 0);
    }

    #[test]
    fn test_order_without_boatmen_pays_no_boatman_share() {
        let mut order = order_with_price(10_000);
        order.boatmen.clear();
        let outcome = apply_commissions(&mut order, &RecalculateRequest::default());
        assert_eq!(outcome.boatman_payout.cents(), 0);
    }
}
