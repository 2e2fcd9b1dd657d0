use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer centavos** (MZN minor units).
///
/// Use this type for **all** monetary values in the engine (transaction
/// amounts, totals, profits) so that sums are exact decimal arithmetic and no
/// rounding ever happens during aggregation.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(150_000);
/// assert_eq!(amount.minor(), 150_000);
/// assert_eq!(amount.format(), "1.500,00 MT");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single record may carry (one trillion meticais).
    ///
    /// Totals over capped records only leave `i64` after tens of thousands of
    /// maximal entries; past that point `+` and `-` saturate.
    pub const MAX_ENTRY: Money = Money(100_000_000_000_000);

    /// Creates a new amount from integer centavos.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in centavos.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Converts a major-unit float (as found in JSON payloads) into centavos,
    /// rounding half away from zero. Magnitudes above [`Money::MAX_ENTRY`] are
    /// rejected.
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount("amount is not a number".to_string()));
        }
        let minor = (value * 100.0).round();
        if minor.abs() > Self::MAX_ENTRY.0 as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self(minor as i64))
    }

    /// Plain decimal rendering with `.` separator and two decimals (`1500.00`).
    ///
    /// Used by machine-readable outputs such as the CSV export.
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }

    /// Human rendering in the Mozambican style: `1.500,00 MT`.
    #[must_use]
    pub fn format(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = (abs / 100).to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (idx, ch) in units.chars().enumerate() {
            if idx > 0 && (units.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        format!("{sign}{grouped},{:02} MT", abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Saturating: aggregates clamp at the `i64` bounds instead of wrapping.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

/// Saturating, like [`Add`].
impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into centavos.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let fraction: i64 = match fraction_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_groups_thousands() {
        assert_eq!(Money::new(0).format(), "0,00 MT");
        assert_eq!(Money::new(5).format(), "0,05 MT");
        assert_eq!(Money::new(150_000).format(), "1.500,00 MT");
        assert_eq!(Money::new(123_456_789).format(), "1.234.567,89 MT");
        assert_eq!(Money::new(-300_000).format(), "-3.000,00 MT");
    }

    #[test]
    fn decimal_string_uses_dot() {
        assert_eq!(Money::new(150_000).to_decimal_string(), "1500.00");
        assert_eq!(Money::new(-1).to_decimal_string(), "-0.01");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("1.500,50".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn from_major_rounds_to_centavos() {
        assert_eq!(Money::from_major(5000.0).unwrap().minor(), 500_000);
        assert_eq!(Money::from_major(0.1 + 0.2).unwrap().minor(), 30);
        assert_eq!(Money::from_major(19.999).unwrap().minor(), 2000);
        assert!(Money::from_major(f64::NAN).is_err());
        assert!(Money::from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn from_major_rejects_amounts_above_entry_cap() {
        assert_eq!(Money::from_major(1e12).unwrap(), Money::MAX_ENTRY);
        assert!(Money::from_major(1e12 + 1.0).is_err());
        assert!(Money::from_major(5e16).is_err());
        assert!(Money::from_major(-5e16).is_err());
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let max = Money::new(i64::MAX);
        let min = Money::new(i64::MIN);
        assert_eq!(max + Money::new(1), max);
        assert_eq!(min - Money::new(1), min);
        assert_eq!(Money::ZERO - max - max, min);
        assert_eq!(min + Money::new(-1), min);
        assert_eq!([max, max, Money::new(1)].into_iter().sum::<Money>(), max);
    }

    #[test]
    fn sum_is_exact() {
        let total: Money = [Money::new(10), Money::new(20), Money::new(-5)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(25));
    }
}
