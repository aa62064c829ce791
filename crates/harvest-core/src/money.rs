//! # Money Module
//!
//! Provides the `Money` and `Percent` types used by every pricing rule.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stacked discounts in f64 drift:                                        │
//! │                                                                         │
//! │    10 × 0.95 × 25 × 0.9 = 213.74999999999997  ❌ WRONG!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    25000 cents − 5%  = 23750 cents                                      │
//! │    23750 cents − 10% = 21375 cents  ($213.75 exactly)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use harvest_core::money::{Money, Percent};
//!
//! let case_price = Money::from_cents(1000); // $10.00
//! let line = case_price.multiply_quantity(25); // $250.00
//! let discounted = line.apply_percentage_discount(Percent::from_bps(500)); // 5% off
//! assert_eq!(discounted.cents(), 23750);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

/// Basis points in 100%.
pub const BPS_PER_WHOLE: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: savings deltas and refunds can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ProductRecord.price_cents ──► CartLine.unit_price ──► CartLine::line_total
///                                                              │
///                              Cart.subtotal ◄─────────────────┘
///                                    │
///                                    ▼ volume tier
///                              Cart.final_total ──► OrderSubmission.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use harvest_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use harvest_core::money::Money;
    ///
    /// let per_crate = Money::from_cents(299);
    /// assert_eq!(per_crate.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns `percent` of this amount, rounded half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000`.
    pub fn percentage_of(&self, percent: Percent) -> Money {
        let part = (self.0 as i128 * percent.bps() as i128 + 5000) / BPS_PER_WHOLE as i128;
        Money::from_cents(part as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ```rust
    /// use harvest_core::money::{Money, Percent};
    ///
    /// let subtotal = Money::from_cents(13500); // $135.00
    /// let payable = subtotal.apply_percentage_discount(Percent::from_bps(2500));
    /// assert_eq!(payable.cents(), 10125); // $101.25
    /// ```
    pub fn apply_percentage_discount(&self, percent: Percent) -> Money {
        *self - self.percentage_of(percent)
    }
}

/// Display is for logs and the CLI; the frontend formats with locale rules.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Percent
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 1500 bps = 15% and 1250 bps = 12.5%.
/// Discounts stay integers all the way through the cart math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from a whole-number percent (`15` = 15%).
    #[inline]
    pub const fn from_whole(percent: u32) -> Self {
        Percent(percent * 100)
    }

    /// Returns the percentage in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `part / whole` as a percentage, rounded half-up.
    ///
    /// A zero or negative `whole` yields 0% instead of dividing by zero.
    /// Negative ratios clamp to 0%.
    pub fn ratio(part: Money, whole: Money) -> Self {
        if !whole.is_positive() || !part.is_positive() {
            return Percent::zero();
        }
        let whole = whole.cents() as i128;
        let bps = (part.cents() as i128 * BPS_PER_WHOLE as i128 + whole / 2) / whole;
        Percent(u32::try_from(bps).unwrap_or(u32::MAX))
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_price_parts() {
        let case_of_lemons = Money::from_cents(3249);
        assert_eq!(case_of_lemons.dollars(), 32);
        assert_eq!(case_of_lemons.cents_part(), 49);
        assert!(case_of_lemons.is_positive());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(21375)), "$213.75");
        assert_eq!(format!("{}", Money::from_cents(10125)), "$101.25");
        assert_eq!(format!("{}", Money::from_cents(-2375)), "-$23.75");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(
            subtotal.apply_percentage_discount(Percent::from_whole(10)).cents(),
            9000
        );
        // 0% is the identity
        assert_eq!(
            subtotal.apply_percentage_discount(Percent::zero()).cents(),
            10000
        );
        // 100% makes it free
        assert_eq!(
            subtotal.apply_percentage_discount(Percent::from_whole(100)).cents(),
            0
        );
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 5% of $0.10 = 0.5 cents -> 1 cent
        let amount = Money::from_cents(10);
        assert_eq!(amount.percentage_of(Percent::from_whole(5)).cents(), 1);
        // 12.5% of $0.99 = 12.375 cents -> 12 cents
        let amount = Money::from_cents(99);
        assert_eq!(amount.percentage_of(Percent::from_bps(1250)).cents(), 12);
    }

    #[test]
    fn test_percent_conversions() {
        assert_eq!(Percent::from_whole(15).bps(), 1500);
        assert_eq!(Percent::from_bps(2500).to_string(), "25%");
        assert_eq!(Percent::from_bps(1250).to_string(), "12.50%");
    }

    #[test]
    fn test_ratio() {
        let pct = Percent::ratio(Money::from_cents(1500), Money::from_cents(15000));
        assert_eq!(pct, Percent::from_whole(10));

        // No division by zero
        assert_eq!(Percent::ratio(Money::zero(), Money::zero()), Percent::zero());
        assert_eq!(
            Percent::ratio(Money::from_cents(5), Money::zero()),
            Percent::zero()
        );
    }
}
