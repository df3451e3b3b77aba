//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths of the currency unit (i64) to avoid
//! floating-point drift when totals are summed. Formatting follows the
//! Indonesian convention: `.` groups thousands and `,` separates up to two
//! fractional digits (`Rp 1.250.000`, `Rp 12.500,5`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Default currency symbol
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Rp";

/// A monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional hundredths (0-99)
    pub const fn fraction(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Amount as a floating point number of units, for ratios only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Mean of `total` over `count` items, rounded down; zero when `count` is 0
    pub fn average(total: Money, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        Money(total.0 / count as i64)
    }

    /// Parse a money amount from user input
    ///
    /// Accepts `"Rp 1.000.000"`, `"1000000"`, `"12.500,50"`, `"12500,5"` and
    /// `"12500.50"`. A dot followed by exactly three digits is a thousands
    /// separator; a dot followed by one or two digits is a decimal point.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };
        let s = s
            .strip_prefix(DEFAULT_CURRENCY_SYMBOL)
            .or_else(|| s.strip_prefix("rp"))
            .or_else(|| s.strip_prefix("RP"))
            .unwrap_or(s)
            .trim();

        if s.is_empty() {
            return Err(invalid());
        }

        let (int_part, frac_part) = if let Some((int, frac)) = s.split_once(',') {
            (strip_thousands(int).ok_or_else(invalid)?, frac.to_string())
        } else if s.contains('.') {
            let parts: Vec<&str> = s.split('.').collect();
            let last = parts[parts.len() - 1];
            if parts.len() == 2 && !last.is_empty() && last.len() <= 2 {
                (parts[0].to_string(), last.to_string())
            } else {
                (strip_thousands(s).ok_or_else(invalid)?, String::new())
            }
        } else {
            (s.to_string(), String::new())
        };

        if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac_part.len() > 2 || !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = int_part.parse().map_err(|_| invalid())?;
        let fraction: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac_part.parse().map_err(|_| invalid())?,
        };

        let minor = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Format with a currency symbol, e.g. `Rp 1.000.000`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let mut out = format!("{}{} {}", sign, symbol, group_thousands(self.units().abs()));

        let fraction = self.fraction();
        if fraction != 0 {
            let digits = format!("{:02}", fraction);
            out.push(',');
            out.push_str(digits.trim_end_matches('0'));
        }

        out
    }
}

/// Remove `.` thousands separators, requiring well-formed three digit groups
fn strip_thousands(s: &str) -> Option<String> {
    let groups: Vec<&str> = s.split('.').collect();
    if groups.len() > 1 {
        let head = groups[0];
        if head.is_empty() || head.len() > 3 {
            return None;
        }
        if groups[1..].iter().any(|g| g.len() != 3) {
            return None;
        }
    }
    Some(groups.concat())
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the `i64` bounds
    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
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
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(1_000_000).to_string(), "Rp 1.000.000");
        assert_eq!(Money::from_units(0).to_string(), "Rp 0");
        assert_eq!(Money::from_minor(1_250_050).to_string(), "Rp 12.500,5");
        assert_eq!(Money::from_minor(1_250_005).to_string(), "Rp 12.500,05");
        assert_eq!(Money::from_units(999).to_string(), "Rp 999");
        assert_eq!(Money::from_units(-1500).to_string(), "-Rp 1.500");
    }

    #[test]
    fn test_custom_symbol() {
        assert_eq!(Money::from_units(25_000).format_with_symbol("IDR"), "IDR 25.000");
    }

    #[test]
    fn test_parse_indonesian_formats() {
        assert_eq!(Money::parse("Rp 1.000.000").unwrap(), Money::from_units(1_000_000));
        assert_eq!(Money::parse("Rp1.000").unwrap(), Money::from_units(1000));
        assert_eq!(Money::parse("12.500,50").unwrap(), Money::from_minor(1_250_050));
        assert_eq!(Money::parse("12500,5").unwrap(), Money::from_minor(1_250_050));
    }

    #[test]
    fn test_parse_plain_formats() {
        assert_eq!(Money::parse("25000").unwrap(), Money::from_units(25_000));
        assert_eq!(Money::parse("12500.50").unwrap(), Money::from_minor(1_250_050));
        assert_eq!(Money::parse("0.05").unwrap(), Money::from_minor(5));
        assert_eq!(Money::parse("-10").unwrap(), Money::from_units(-10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("Rp").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.00.0").is_err());
        assert!(Money::parse("10,505").is_err());
        assert!(Money::parse("1.2345").is_err());
    }

    #[test]
    fn test_average() {
        let total = Money::from_units(300);
        assert_eq!(Money::average(total, 3), Money::from_units(100));
        assert_eq!(Money::average(total, 0), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_units(1), Money::from_units(2), Money::from_minor(50)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.minor(), 350);
    }

    #[test]
    fn test_sum_saturates() {
        let half = Money::from_minor(i64::MAX / 2 + 10);
        let total: Money = [half, half].iter().sum();
        assert_eq!(total, Money::from_minor(i64::MAX));

        let mut running = half;
        running += half;
        assert_eq!(running, Money::from_minor(i64::MAX));
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1050);
        assert_eq!(serde_json::to_string(&m).unwrap(), "1050");

        // Stored as whole hundredths: Rp 15.000 is 1500000
        let stored = serde_json::to_string(&Money::from_units(15_000)).unwrap();
        assert_eq!(stored, "1500000");
        assert_eq!(serde_json::from_str::<Money>(&stored).unwrap(), Money::from_units(15_000));
    }
}
