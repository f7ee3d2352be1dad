//! # Money Module
//!
//! Provides the `Money` and `Percent` value types used by every costing
//! formula.
//!
//! ## Why Floating Point Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COSTING IS NOT SETTLEMENT                                              │
//! │                                                                         │
//! │  A cost calculator divides all the time:                                │
//! │    rent $1000 / 350 expected units   = $2.857142... per unit            │
//! │    $100 package / 50 units/package   = $2.00 per unit                   │
//! │                                                                         │
//! │  Rounding each intermediate step to cents would make the result         │
//! │  depend on where the rounding happens. The formulas are therefore       │
//! │  defined on f64 and only the DISPLAY rounds to cents.                   │
//! │                                                                         │
//! │    Money::new(35.2625)  →  "$35.26"                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use costwise_core::money::{Money, Percent};
//!
//! let direct = Money::new(25.0);
//! let after_markup = direct * Percent::new(30.0).factor();
//! assert_eq!(after_markup, Money::new(32.5));
//! assert_eq!(after_markup.to_string(), "$32.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A currency amount (single currency, no conversion).
///
/// ## Where Money is Used
/// ```text
/// Item.base_cost ──┬──► PriceInput ──► PriceBreakdown.final_price_per_unit
///                  │
///                  └──► ComponentSnapshot ──► BomLine.cost (frozen)
///
/// OperatingCostEntry.amount ──► monthly_total ──► per-unit charge
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from a currency amount.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Formats the amount with a currency symbol and a fixed number of
    /// decimals.
    ///
    /// ## Example
    /// ```rust
    /// use costwise_core::money::Money;
    ///
    /// assert_eq!(Money::new(2.857142).format_with("€", 2), "€2.86");
    /// assert_eq!(Money::new(-5.5).format_with("$", 2), "-$5.50");
    /// assert_eq!(Money::new(1200.0).format_with("¥", 0), "¥1200");
    /// ```
    pub fn format_with(&self, symbol: &str, decimals: usize) -> String {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        format!("{}{}{:.*}", sign, symbol, decimals, self.0.abs())
    }
}

/// Display shows money with a dollar sign and two decimals.
///
/// ## Note
/// This is for logs and tests. The CLI formats with the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$", 2))
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Scaling by a factor or a quantity.
impl Mul<f64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Money(self.0 * factor)
    }
}

/// Division by a unit count.
impl Div<f64> for Money {
    type Output = Self;

    #[inline]
    fn div(self, divisor: f64) -> Self {
        Money(self.0 / divisor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Percent Type
// =============================================================================

/// A percentage such as a markup or a tax rate (`8.5` = 8.5%).
///
/// Markup and tax compound: `price * markup.factor() * tax.factor()`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    /// Creates a percentage from its percent value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0.0)
    }

    /// Returns the percent value (`8.5` for 8.5%).
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns the multiplication factor `1 + value / 100`.
    #[inline]
    pub fn factor(&self) -> f64 {
        1.0 + self.0 / 100.0
    }

    /// Checks if the percentage is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(10.99)), "$10.99");
        assert_eq!(format!("{}", Money::new(5.0)), "$5.00");
        assert_eq!(format!("{}", Money::new(-5.5)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        assert_eq!(format!("{}", Percent::new(8.5)), "8.5%");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(10.0);
        let b = Money::new(5.0);

        assert_eq!(a + b, Money::new(15.0));
        assert_eq!(a - b, Money::new(5.0));
        assert_eq!(a * 3.0, Money::new(30.0));
        assert_eq!(a / 4.0, Money::new(2.5));
        assert_eq!(-a, Money::new(-10.0));

        let mut c = a;
        c += b;
        c -= Money::new(1.0);
        assert_eq!(c, Money::new(14.0));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::new(1.5), Money::new(2.5), Money::new(6.0)];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref, Money::new(10.0));
        assert_eq!(by_value, Money::new(10.0));

        let empty: [Money; 0] = [];
        assert!(empty.iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_percent_factor() {
        assert_eq!(Percent::new(30.0).factor(), 1.3);
        assert_eq!(Percent::zero().factor(), 1.0);
        assert!(Percent::zero().is_zero());
        assert!(!Percent::new(0.01).is_zero());
    }

    #[test]
    fn test_negative_values_pass_through() {
        let refund = Money::new(-3.0);
        assert!(refund.is_negative());
        assert_eq!(refund * Percent::new(-50.0).factor(), Money::new(-1.5));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Money::new(12.5)).unwrap();
        assert_eq!(json, "12.5");
        let back: Percent = serde_json::from_str("8.5").unwrap();
        assert_eq!(back, Percent::new(8.5));
    }
}
