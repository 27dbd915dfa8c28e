// 💰 Money - exact two-decimal amounts
// Stored as whole cents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

// ============================================================================
// MONEY
// ============================================================================

/// Non-negative amount with two-place precision.
///
/// Displays as a plain decimal string (`120.00`). No currency symbol is
/// attached here; the presentation layer decides that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Money { cents }
    }

    /// Whole units, e.g. `Money::from_units(120)` is `120.00`
    pub const fn from_units(units: u64) -> Self {
        Money { cents: units * 100 }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Multiply by a quantity, `None` on overflow
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(u64::from(quantity))
            .map(Money::from_cents)
    }

    /// Add, `None` on overflow
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.cents.checked_add(rhs.cents).map(Money::from_cents)
    }

    /// Convert from a float amount (rounded to the nearest cent)
    pub fn from_f64(value: f64) -> Result<Self, String> {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("Invalid amount: {}", value));
        }

        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(format!("Amount out of range: {}", value));
        }

        Ok(Money::from_cents(cents as u64))
    }

    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Money {
    type Err = String;

    /// Accepts `120`, `120.5` and `120.50`; more than two decimals is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (units_str, frac_str) = match trimmed.split_once('.') {
            Some((units, frac)) => (units, frac),
            None => (trimmed, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if units_str.is_empty() || !all_digits(units_str) || !all_digits(frac_str) || frac_str.len() > 2 {
            return Err(format!("Invalid amount: {:?}", s));
        }

        let units: u64 = units_str
            .parse()
            .map_err(|_| format!("Amount out of range: {:?}", s))?;
        let frac: u64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<u64>().unwrap_or(0) * 10,
            _ => frac_str.parse::<u64>().unwrap_or(0),
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Money::from_cents)
            .ok_or_else(|| format!("Amount out of range: {:?}", s))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

// ============================================================================
// SERDE
// ============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Config files may write prices as `120.0` or `"120.00"`
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Text(String),
    Number(f64),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Text(s) => s.parse::<Money>().map_err(serde::de::Error::custom),
            MoneyRepr::Number(n) => Money::from_f64(n).map_err(serde::de::Error::custom),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
