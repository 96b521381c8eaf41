//! # Proportional Pool Redistribution
//!
//! A group holds two deduction pools, `less` and `gift`, each the sum of
//! its field across every order in the group. When a deduction is applied
//! the remaining pool is redistributed across the orders in proportion to
//! each order's original share.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  shares [40, 60], deduction 30                                      │
//! │                                                                     │
//! │  current_total = 100                                                │
//! │  remaining     = max(0, 100 - 30) = 70                              │
//! │  new shares    = round(70 × 40/100) = 28                            │
//! │                  round(70 × 60/100) = 42                            │
//! │                                                                     │
//! │  Independent rounding can leave the sum a few cents off, so the     │
//! │  LAST share absorbs the residual: sum(new shares) == remaining,     │
//! │  always. Money is conserved across the split.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;

/// Result of redistributing one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redistribution {
    /// New per-order shares, in the same order as the input. Their sum is
    /// exactly `remaining`.
    pub shares: Vec<Money>,
    /// Pool total before the deduction.
    pub current_total: Money,
    /// Pool total after the deduction, floored at zero.
    pub remaining: Money,
}

/// Redistributes a deduction pool proportionally across its orders.
///
/// Each new share is `round(remaining × original / current_total)`; when
/// the pool is empty every share is zero regardless of the deduction. The
/// last share absorbs any rounding residual so the shares always sum to
/// `remaining` exactly.
///
/// Absorbing the residual can push the last share below zero when its
/// original share was zero or very small (e.g. `[1, 1, 0]` with
/// deduction 1 yields `[1, 1, -1]`). The sum invariant is kept in
/// preference to per-share non-negativity, matching the settled
/// behavior order records are built on.
pub fn redistribute(original_shares: &[Money], deduction: Money) -> Redistribution {
    let current_total = original_shares
        .iter()
        .fold(Money::zero(), |acc, s| acc + *s);
    let remaining = current_total.deduct_floor_zero(deduction);

    let mut shares: Vec<Money> = original_shares
        .iter()
        .map(|original| remaining.proportional_share(original.cents(), current_total.cents()))
        .collect();

    // Reconcile the rounding residual onto the last order processed.
    if !shares.is_empty() {
        let distributed = shares.iter().fold(Money::zero(), |acc, s| acc + *s);
        let residual = remaining - distributed;
        if !residual.is_zero() {
            if let Some(last) = shares.last_mut() {
                *last = *last + residual;
            }
        }
    }

    Redistribution {
        shares,
        current_total,
        remaining,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(values: &[i64]) -> Vec<Money> {
        values.iter().map(|v| Money::from_cents(*v)).collect()
    }

    fn share_cents(result: &Redistribution) -> Vec<i64> {
        result.shares.iter().map(|s| s.cents()).collect()
    }

    #[test]
    fn test_proportional_split() {
        // [10, 20, 30] total 60, deduction 30 -> remaining 30
        let result = redistribute(&cents(&[10, 20, 30]), Money::from_cents(30));
        assert_eq!(result.current_total.cents(), 60);
        assert_eq!(result.remaining.cents(), 30);
        assert_eq!(share_cents(&result), vec![5, 10, 15]);
    }

    #[test]
    fn test_two_document_group_scenario() {
        // less = 40 and 60 (total 100), deduction 20 + 10 -> remaining 70
        let result = redistribute(&cents(&[40, 60]), Money::from_cents(30));
        assert_eq!(share_cents(&result), vec![28, 42]);
        assert_eq!(result.remaining.cents(), 70);
    }

    #[test]
    fn test_zero_pool_gives_zero_shares() {
        let result = redistribute(&cents(&[0, 0, 0]), Money::from_cents(50));
        assert_eq!(share_cents(&result), vec![0, 0, 0]);
        assert_eq!(result.remaining.cents(), 0);
    }

    #[test]
    fn test_deduction_larger_than_pool_floors_at_zero() {
        let result = redistribute(&cents(&[10, 20]), Money::from_cents(100));
        assert_eq!(result.remaining.cents(), 0);
        assert_eq!(share_cents(&result), vec![0, 0]);
    }

    #[test]
    fn test_single_order_group() {
        let result = redistribute(&cents(&[75]), Money::from_cents(25));
        assert_eq!(share_cents(&result), vec![50]);
    }

    #[test]
    fn test_empty_group() {
        let result = redistribute(&[], Money::from_cents(25));
        assert!(result.shares.is_empty());
        assert_eq!(result.current_total.cents(), 0);
    }

    #[test]
    fn test_residual_reconciled_onto_last_share() {
        // total 99, deduction 0: rounding each share independently would
        // not necessarily sum to 99; reconciliation must restore it.
        let result = redistribute(&cents(&[33, 33, 33]), Money::zero());
        assert_eq!(share_cents(&result).iter().sum::<i64>(), 99);

        let result = redistribute(&cents(&[1, 1, 1]), Money::from_cents(1));
        assert_eq!(share_cents(&result).iter().sum::<i64>(), 2);
    }

    #[test]
    fn test_residual_can_push_last_share_negative() {
        // A zero last share still absorbs the residual, so it can go
        // negative. The sum invariant holds regardless.
        let result = redistribute(&cents(&[1, 1, 0]), Money::from_cents(1));
        assert_eq!(result.remaining.cents(), 1);
        assert_eq!(share_cents(&result), vec![1, 1, -1]);
        assert_eq!(share_cents(&result).iter().sum::<i64>(), 1);
    }

    #[test]
    fn test_conservation_for_arbitrary_distributions() {
        let cases: &[(&[i64], i64)] = &[
            (&[10, 20, 30], 30),
            (&[1, 2, 3, 4, 5], 7),
            (&[99], 98),
            (&[7, 7, 7, 7], 13),
            (&[1000, 1, 1, 1], 500),
            (&[3, 3, 3], 1),
        ];
        for (shares, deduction) in cases {
            let originals = cents(shares);
            let result = redistribute(&originals, Money::from_cents(*deduction));
            let total: i64 = shares.iter().sum();
            let expected_remaining = (total - deduction).max(0);
            assert_eq!(
                share_cents(&result).iter().sum::<i64>(),
                expected_remaining,
                "shares {:?} deduction {}",
                shares,
                deduction
            );
        }
    }
}
