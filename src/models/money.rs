//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. On the wire (storage and exchange files) amounts are plain JSON
//! numbers in currency units, e.g. `49.9`, and are rounded to the nearest
//! cent when read back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(4990); // 49.90
    /// assert_eq!(amount.to_string(), "49.90");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a value in currency units, rounding to the
    /// nearest cent
    ///
    /// Values beyond the representable range saturate; use
    /// [`Money::try_from_units`] to reject them instead.
    pub fn from_units(units: f64) -> Self {
        Self((units * 100.0).round() as i64)
    }

    /// Like [`Money::from_units`], but `None` for non-finite values or values
    /// whose cent amount does not fit in an `i64`
    pub fn try_from_units(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        (cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64)
            .then(|| Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units
    pub fn units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn whole(&self) -> i64 {
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

    /// Multiply by a quantity (shopping list line totals), saturating at the
    /// representable range
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "10,50", "$10.50", "R$ 10,50", "10" and "-10.50".
    /// Either `.` or `,` may be the decimal separator.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Remove currency symbol if present
        let s = s
            .trim_start_matches(|c: char| c.is_alphabetic() || c == '$')
            .trim();

        let normalized = s.replace(',', ".");
        let cents = if normalized.contains('.') {
            let parts: Vec<&str> = normalized.split('.').collect();
            if parts.len() != 2 || parts[0].is_empty() {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            let whole: i64 = parts[0]
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

            // Pad or truncate cents to 2 digits
            let cents_str = parts[1];
            if !cents_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => {
                    cents_str
                        .parse::<i64>()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                        * 10
                }
                _ => cents_str[..2]
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
            };

            whole
                .checked_mul(100)
                .and_then(|c| c.checked_add(cents))
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
        } else {
            normalized
                .parse::<i64>()
                .ok()
                .and_then(|whole| whole.checked_mul(100))
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.whole().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.whole(), self.cents_part())
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
        self.format_with_symbol("").fmt(f)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.units())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        Self::try_from_units(units).ok_or_else(|| {
            serde::de::Error::custom(format!("amount {} is out of range", units))
        })
    }
}

// Arithmetic saturates at the i64 range instead of overflowing
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.whole(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_units_rounds() {
        assert_eq!(Money::from_units(49.9).cents(), 4990);
        assert_eq!(Money::from_units(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_units(12.346).cents(), 1235);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(Money::from_cents(5).format_with_symbol("R$ "), "R$ 0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("R$ 49,90").unwrap().cents(), 4990);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(",50").is_err());
    }

    #[test]
    fn test_times_and_sum() {
        assert_eq!(Money::from_cents(250).times(3).cents(), 750);
        let total: Money = vec![Money::from_cents(100), Money::from_cents(200)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 300);
    }

    #[test]
    fn test_serialization_as_units() {
        let m = Money::from_cents(4990);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "49.9");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);

        let whole: Money = serde_json::from_str("10").unwrap();
        assert_eq!(whole.cents(), 1000);
    }

    #[test]
    fn test_out_of_range_amounts_rejected() {
        assert!(serde_json::from_str::<Money>("1e17").is_err());
        assert!(serde_json::from_str::<Money>("-1e300").is_err());
        assert_eq!(Money::try_from_units(f64::NAN), None);
        assert_eq!(Money::try_from_units(9e16).map(|m| m.cents()), Some(9_000_000_000_000_000_000));
        assert!(Money::parse("99999999999999999999").is_err());
        assert!(Money::parse("999999999999999999.50").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::try_from_units(9e16).unwrap();
        let total: Money = vec![big, big].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - big).cents(), i64::MIN);
        assert_eq!(big.times(3).cents(), i64::MAX);

        let mut acc = big;
        acc += big;
        assert_eq!(acc.cents(), i64::MAX);
    }
}
