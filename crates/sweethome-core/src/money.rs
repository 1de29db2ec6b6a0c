//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All amounts in the system are Belarusian rubles (BYN) held as integer
//! kopecks (1 BYN = 100 kopecks). Integer minor units sidestep the usual
//! floating-point drift: `0.1 + 0.2` never shows up as `0.30000000000000004`
//! on a price tag.
//!
//! ## Usage
//! ```rust
//! use sweethome_core::money::Money;
//!
//! // Create from kopecks (preferred)
//! let price = Money::from_kopecks(45_00); // 45.00 BYN
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // 90.00 BYN
//! let total = price + Money::from_kopecks(5_00);  // 50.00 BYN
//!
//! // Parse a user-entered amount
//! let amount: Money = "45.50".parse().unwrap();
//! assert_eq!(amount.kopecks(), 4550);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in kopecks (the smallest BYN unit).
///
/// ## Design Notes
/// - **i64 (signed)**: allows negative values for corrections/refunds
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, serialized as a bare integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kopecks.
    ///
    /// ## Example
    /// ```rust
    /// use sweethome_core::money::Money;
    ///
    /// let price = Money::from_kopecks(4500); // 45.00 BYN
    /// assert_eq!(price.kopecks(), 4500);
    /// ```
    #[inline]
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Money(kopecks)
    }

    /// Creates a Money value from whole rubles.
    #[inline]
    pub const fn from_rubles(rubles: i64) -> Self {
        Money(rubles * 100)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -5.50 BYN, not -4.50 BYN.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in kopecks.
    #[inline]
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Returns the whole-ruble portion.
    #[inline]
    pub const fn rubles(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the kopeck portion (always 0-99).
    #[inline]
    pub const fn kopecks_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Saturating subtraction clamped at zero.
    ///
    /// Used by the free-delivery gap computation: the amount still needed
    /// is never negative, no matter how large the cart total is.
    ///
    /// ## Example
    /// ```rust
    /// use sweethome_core::money::Money;
    ///
    /// let threshold = Money::from_rubles(100);
    /// let total = Money::from_rubles(120);
    /// assert_eq!(threshold.gap_to(total), Money::zero());
    ///
    /// let total = Money::from_rubles(60);
    /// assert_eq!(threshold.gap_to(total), Money::from_rubles(40));
    /// ```
    #[inline]
    pub const fn gap_to(&self, reached: Money) -> Self {
        let diff = self.0 - reached.0;
        if diff > 0 {
            Money(diff)
        } else {
            Money(0)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is the canonical display form used in messages and logs;
/// a presentation layer is free to localize differently.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} BYN",
            sign,
            self.rubles().abs(),
            self.kopecks_part()
        )
    }
}

/// Default money is zero.
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

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Parse error for user-entered amounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid money amount: {0:?}")]
pub struct ParseMoneyError(pub String);

/// Parses decimal amounts as entered in the delivery calculator form.
///
/// Accepts `"45"`, `"45.5"` and `"45.50"` (at most two fraction digits),
/// with an optional leading minus. Everything else is rejected.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(ParseMoneyError(s.to_string()));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseMoneyError(s.to_string()));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseMoneyError(s.to_string()));
        }

        let rubles: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError(s.to_string()))?
        };
        // ".5" means 50 kopecks, ".50" also 50
        let kopecks: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseMoneyError(s.to_string()))? * 10,
            _ => frac.parse().map_err(|_| ParseMoneyError(s.to_string()))?,
        };

        let total = rubles * 100 + kopecks;
        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kopecks() {
        let money = Money::from_kopecks(4550);
        assert_eq!(money.kopecks(), 4550);
        assert_eq!(money.rubles(), 45);
        assert_eq!(money.kopecks_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(45, 50);
        assert_eq!(money.kopecks(), 4550);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.kopecks(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_kopecks(4550)), "45.50 BYN");
        assert_eq!(format!("{}", Money::from_kopecks(500)), "5.00 BYN");
        assert_eq!(format!("{}", Money::from_kopecks(-550)), "-5.50 BYN");
        assert_eq!(format!("{}", Money::from_kopecks(0)), "0.00 BYN");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_kopecks(1000);
        let b = Money::from_kopecks(500);

        assert_eq!((a + b).kopecks(), 1500);
        assert_eq!((a - b).kopecks(), 500);
        assert_eq!((a * 3).kopecks(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.kopecks(), 1500);
    }

    #[test]
    fn test_gap_to() {
        let threshold = Money::from_rubles(100);
        assert_eq!(threshold.gap_to(Money::from_rubles(45)), Money::from_rubles(55));
        assert_eq!(threshold.gap_to(Money::from_rubles(100)), Money::zero());
        assert_eq!(threshold.gap_to(Money::from_rubles(150)), Money::zero());
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!("45".parse::<Money>().unwrap().kopecks(), 4500);
        assert_eq!("45.5".parse::<Money>().unwrap().kopecks(), 4550);
        assert_eq!("45.50".parse::<Money>().unwrap().kopecks(), 4550);
        assert_eq!("0.05".parse::<Money>().unwrap().kopecks(), 5);
        assert_eq!(" 12 ".parse::<Money>().unwrap().kopecks(), 1200);
        assert_eq!("-5.50".parse::<Money>().unwrap().kopecks(), -550);
        assert_eq!(".5".parse::<Money>().unwrap().kopecks(), 50);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("45.555".parse::<Money>().is_err());
        assert!("45,50".parse::<Money>().is_err());
        assert!("4 5".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_kopecks(100).is_positive());
        assert!(Money::from_kopecks(-100).is_negative());
    }
}
