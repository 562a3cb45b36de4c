//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 20 = 30 cents                                                   │
//! │                                                                         │
//! │  Catalog prices arrive as decimal dollars. They are converted ONCE,    │
//! │  at the edge, by `Money::from_major_units`. Everything after that is   │
//! │  integer arithmetic.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabana_core::money::Money;
//!
//! let price = Money::from_major_units(45.00);
//! assert_eq!(price.cents(), 4500);
//!
//! let line = price.saturating_mul_quantity(2);
//! assert_eq!(line.cents(), 9000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for AUD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction can go below zero before being clamped
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord**: Lets the pricing engine clamp with `max(Money::zero())`
/// - **Saturating `+` / `-`**: One overflow policy for every operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (dollars) to cents.
    ///
    /// Rounds `amount * 100` to the nearest integer, halves away from zero.
    /// The multiplication happens in `f64`, so a price such as `1.005`, which
    /// is stored as `1.00499999...`, becomes 100 cents, while an exactly
    /// representable half such as `0.125` becomes 13 cents.
    ///
    /// Values beyond the `i64` range saturate. NaN maps to zero; callers
    /// validate finiteness before converting.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(45.0).cents(), 4500);
    /// assert_eq!(Money::from_major_units(0.125).cents(), 13);
    /// assert_eq!(Money::from_major_units(1.005).cents(), 100);
    /// ```
    #[inline]
    pub fn from_major_units(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
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

    /// Clamps negative values to zero.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-4000).non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(250).non_negative().cents(), 250);
    /// ```
    #[inline]
    pub fn non_negative(self) -> Self {
        self.max(Money::zero())
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    ///
    /// The pricing engine is a live per-keystroke calculator, so an absurd
    /// quantity yields a huge number rather than a panic.
    #[inline]
    pub const fn saturating_mul_quantity(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34` / `-$5.50`.
///
/// ## Note
/// Currency-specific symbols live in [`crate::display::format_currency`].
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

/// Saturates at the `i64` bounds instead of overflowing.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Saturates at the `i64` bounds instead of overflowing.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_units_whole_and_fractional() {
        assert_eq!(Money::from_major_units(45.0).cents(), 4500);
        assert_eq!(Money::from_major_units(30.0).cents(), 3000);
        assert_eq!(Money::from_major_units(19.99).cents(), 1999);
        assert_eq!(Money::from_major_units(0.0).cents(), 0);
    }

    /// Pins the half-cent boundary: exact halves round away from zero,
    /// values whose binary form sits just below the half round down.
    #[test]
    fn test_from_major_units_half_cent_boundary() {
        assert_eq!(Money::from_major_units(0.125).cents(), 13);
        assert_eq!(Money::from_major_units(0.375).cents(), 38);
        assert_eq!(Money::from_major_units(1.005).cents(), 100);
        assert_eq!(Money::from_major_units(-0.125).cents(), -13);
    }

    #[test]
    fn test_from_major_units_saturates() {
        assert_eq!(Money::from_major_units(1e300).cents(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((b - a).non_negative(), Money::zero());
    }

    #[test]
    fn test_saturating_operations() {
        let big = Money::from_cents(i64::MAX / 2);
        assert_eq!(big.saturating_mul_quantity(3).cents(), i64::MAX);
        assert_eq!((big + big + big).cents(), i64::MAX);
        assert_eq!(Money::from_cents(299).saturating_mul_quantity(3).cents(), 897);
    }

    #[test]
    fn test_subtraction_saturates() {
        let min = Money::from_cents(i64::MIN + 10);
        assert_eq!((min - Money::from_cents(100)).cents(), i64::MIN);
        assert_eq!((Money::from_cents(i64::MAX) - Money::from_cents(-1)).cents(), i64::MAX);
        assert_eq!((Money::from_cents(-5) - Money::from_cents(i64::MAX)).non_negative(), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_cents(-1).is_zero());
    }
}
