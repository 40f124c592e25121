//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that splits, balances and
//! settlements never accumulate floating-point error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbols accepted (and ignored) when parsing
const KNOWN_SYMBOLS: [char; 4] = ['$', '₹', '€', '£'];

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The smallest representable non-zero amount
    pub const CENT: Money = Money(1);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use zensplit::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value, saturating at the largest amount
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Add, or `None` if the result does not fit
    pub fn checked_add(self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtract, or `None` if the result does not fit
    pub fn checked_sub(self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Add, saturating at the bounds of the representable range
    pub const fn saturating_add(self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Sum `amounts`, or `None` if any partial total does not fit
    pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Money>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(*amount))
    }

    /// True when the absolute amount is strictly below `epsilon`
    pub const fn is_negligible(&self, epsilon: Money) -> bool {
        self.0.unsigned_abs() < epsilon.0.unsigned_abs()
    }

    /// True when `self` and `other` differ by at most `tolerance`
    ///
    /// Amounts too far apart for their difference to fit are never within
    /// tolerance.
    pub const fn within(&self, other: Money, tolerance: Money) -> bool {
        match self.0.checked_sub(other.0) {
            Some(diff) => diff.unsigned_abs() <= tolerance.0.unsigned_abs(),
            None => false,
        }
    }

    /// The amount as a decimal number of currency units
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Convert a decimal number of currency units into Money, flooring
    /// anything below one cent
    ///
    /// Returns `None` if the value does not fit.
    pub fn floor_from_decimal(value: Decimal) -> Option<Self> {
        (value * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::ToNegativeInfinity)
            .to_i64()
            .map(Self)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "₹10.50", "10", "10.5"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();

        // Handle negative sign at start
        let (negative, rest) = if let Some(stripped) = input.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, input)
        };

        let rest = rest.trim_start_matches(KNOWN_SYMBOLS).replace(',', "");
        if rest.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let cents = match rest.split_once('.') {
            Some((units_str, cents_str)) => {
                if !units_str.chars().all(|c| c.is_ascii_digit())
                    || !cents_str.chars().all(|c| c.is_ascii_digit())
                    || (units_str.is_empty() && cents_str.is_empty())
                {
                    return Err(invalid());
                }

                let units: i64 = if units_str.is_empty() {
                    0
                } else {
                    units_str.parse().map_err(|_| invalid())?
                };

                // Pad cents to 2 digits; anything finer than a cent is rejected
                let cents: i64 = match cents_str.len() {
                    0 => 0,
                    1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => cents_str.parse().map_err(|_| invalid())?,
                    _ => return Err(invalid()),
                };

                units
                    .checked_mul(100)
                    .and_then(|u| u.checked_add(cents))
                    .ok_or_else(invalid)?
            }
            None => {
                if !rest.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                rest.parse::<i64>()
                    .map_err(|_| invalid())?
                    .checked_mul(100)
                    .ok_or_else(invalid)?
            }
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }

    /// Format with an explicit sign, as used for balances
    pub fn format_signed(&self, symbol: &str) -> String {
        if self.is_positive() {
            format!("+{}", self.format_with_symbol(symbol))
        } else {
            self.format_with_symbol(symbol)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
