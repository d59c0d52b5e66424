//! # Money Module
//!
//! Provides the `Money` type for rounded, persisted monetary values.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE EACH REPRESENTATION LIVES                                        │
//! │                                                                         │
//! │  Decimal (rust_decimal)             Money (i64 cents)                   │
//! │  ─────────────────────              ─────────────────                   │
//! │  • Inside the totals engine         • On persisted orders/invoices      │
//! │  • Full precision, never rounded    • Receipts, exports, dashboards     │
//! │  • 2 × 100.005 = 200.010 exactly    • 20001 cents, rounded ONCE         │
//! │                                                                         │
//! │  Decimal ──── round half away from zero, 2 dp ────► Money               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Round an engine result exactly once
//! let tax = Money::from_decimal(Decimal::new(10825, 3)).unwrap(); // 10.825
//! assert_eq!(tax.cents(), 1083);
//!
//! let total = price + tax;
//! assert_eq!(total.to_string(), "$21.82");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Fractional digits kept when a decimal amount becomes Money.
pub const CENT_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between totals may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `1099` in JSON, no float parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a full-precision decimal to cents, half away from zero.
    ///
    /// This is the only place where engine output loses precision.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::from_decimal(Decimal::new(1085, 2)).unwrap().cents(), 1085);
    /// assert_eq!(Money::from_decimal(Decimal::new(10805, 3)).unwrap().cents(), 1081);
    /// assert_eq!(Money::from_decimal(Decimal::new(-10805, 3)).unwrap().cents(), -1081);
    /// ```
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let mut rounded = amount
            .round_dp_with_strategy(CENT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CENT_DECIMAL_PLACES);

        i64::try_from(rounded.mantissa())
            .map(Money)
            .map_err(|_| CoreError::overflow("cent conversion"))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, reporting `ArithmeticOverflow` instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let sum = Money::from_cents(1000).checked_add(Money::from_cents(99)).unwrap();
    /// assert_eq!(sum.cents(), 1099);
    /// assert!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)).is_err());
    /// ```
    pub fn checked_add(self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| CoreError::overflow("cent addition"))
    }

    /// Subtracts `other`, reporting `ArithmeticOverflow` instead of wrapping.
    pub fn checked_sub(self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| CoreError::overflow("cent subtraction"))
    }

    /// Splits the amount evenly over `count` parts, rounding half away from zero.
    ///
    /// Returns zero when `count` is zero, so an empty dashboard shows $0.00
    /// instead of failing.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let revenue = Money::from_cents(1000);
    /// assert_eq!(revenue.average_over(3).cents(), 333);
    /// assert_eq!(Money::from_cents(1001).average_over(2).cents(), 501);
    /// assert_eq!(revenue.average_over(0), Money::zero());
    /// ```
    pub fn average_over(&self, count: u64) -> Money {
        if count == 0 {
            return Money::zero();
        }

        // i128 so that 2 × i64::MAX cannot overflow
        let total = self.0 as i128;
        let n = count as i128;
        let avg = if total >= 0 {
            (2 * total + n) / (2 * n)
        } else {
            -((-2 * total + n) / (2 * n))
        };

        Money(avg as i64)
    }

    /// Formats the amount with an arbitrary currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(19080).format_with("RM "), "RM 190.80");
    /// assert_eq!(Money::from_cents(-550).format_with("€"), "-€5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses a `$` sign. Hosts with another currency call `format_with`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
