//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004                                  │
//! │                                                                     │
//! │  Split a 100.00 deduction pool three ways in floats and the         │
//! │  shares stop summing to the pool. The settlement engine must        │
//! │  conserve money exactly across a split, so every amount is an       │
//! │  integer count of cents and rounding is explicit.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lagoon_core::money::Money;
//! use lagoon_core::types::Rate;
//!
//! let price = Money::from_cents(10_000); // Rs 100.00
//!
//! // Commission at 15%
//! let guide = price.apply_rate(Rate::from_bps(1500));
//! assert_eq!(guide.cents(), 1500);
//!
//! // Deductions floor at zero, never go negative
//! let after = guide.deduct_floor_zero(Money::from_cents(2000));
//! assert!(after.is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate arithmetic may dip negative before a
///   floor is applied
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage rate and rounds half-up to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math throughout: `(cents * bps + 5000) / 10000`.
    /// i128 intermediates rule out overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use lagoon_core::money::Money;
    /// use lagoon_core::types::Rate;
    ///
    /// let price = Money::from_cents(9_999);
    /// let cut = price.apply_rate(Rate::from_bps(1250)); // 12.5%
    /// assert_eq!(cut.cents(), 1250); // 1249.875 rounds up
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Subtracts a deduction, flooring the result at zero.
    ///
    /// Commission deductions ("less"/"gift") may exceed the computed
    /// amount; the payout then becomes zero rather than negative.
    #[inline]
    pub fn deduct_floor_zero(&self, deduction: Money) -> Money {
        Money((self.0 - deduction.0).max(0))
    }

    /// Splits this amount proportionally to `weight / total`, rounding
    /// half-up. Returns zero when `total` is zero.
    ///
    /// Used by pool redistribution: each order's new share of a deduction
    /// pool is the remaining pool scaled by the order's original fraction.
    pub fn proportional_share(&self, weight: i64, total: i64) -> Money {
        if total == 0 {
            return Money::zero();
        }
        let numerator = self.0 as i128 * weight as i128;
        let denominator = total as i128;
        // Round half-up while staying in integer arithmetic.
        let share = (2 * numerator + denominator) / (2 * denominator);
        Money::from_cents(share as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display for debugging and log output. The UI layer owns localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
