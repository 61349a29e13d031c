//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A tier priced 0.10/kg over 3 kg in floating point:                     │
//! │    0.1 + 0.1 + 0.1 = 0.30000000000000004  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise, cents, ...)                  │
//! │    10 × 3 = 30 minor units, exactly                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agrimart_core::money::Money;
//!
//! let per_kg = Money::from_minor(4250); // 42.50 per kg
//! let line = per_kg.multiply_quantity(12);
//! assert_eq!(line.minor(), 51_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PriceTier.price_per_unit ──┐                                           │
/// │                             ├──► resolve_unit_price ──► line total      │
/// │  ProductVariant.base_price ─┘                                           │
/// │                                                                         │
/// │  RateCard fees ──► CostBreakdown.total                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use agrimart_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// Saturates instead of overflowing, like every other arithmetic
    /// operation on `Money`: a runaway cart shows an absurd total, never a
    /// wrapped negative one.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `self × rate`, rounding half up.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000`, clamped to the
    /// i64 range.
    ///
    /// ```rust
    /// use agrimart_core::{Money, Rate};
    ///
    /// // 10.00 at 0.5% insurance = 0.05
    /// let premium = Money::from_minor(1000).apply_rate(Rate::from_bps(50));
    /// assert_eq!(premium.minor(), 5);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let scaled = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Returns `self - other`, floored at zero.
    #[inline]
    pub fn saturating_sub_floor(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without a currency symbol.
///
/// The symbol is a display concern owned by the caller's configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
