//! Fixed-point monetary type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so that prices such as
//! `109.50` add up exactly instead of drifting the way binary floats do.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// A price that maintains exactly 2 decimal places of precision.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use checkout::Money;
///
/// let price = Money::from_str("109.5").unwrap();
/// assert_eq!(price.to_string(), "109.50");
/// assert_eq!((price * 3).to_string(), "328.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates a new `Money` from a `Decimal`, rounding to 2 decimal places.
    ///
    /// Values too large to carry 2 decimal places keep their integer form.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value.round_dp(Self::SCALE);
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Creates a `Money` from an integer number of cents.
    ///
    /// ```
    /// use checkout::Money;
    ///
    /// assert_eq!(Money::from_cents(54999).to_string(), "549.99");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, Self::SCALE))
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    /// Parses a price exactly: more than 2 significant decimal places, or a
    /// magnitude that cannot hold 2 decimal places, is an error rather than
    /// a silently altered value.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        if decimal.normalize().scale() > Self::SCALE {
            return Err(rust_decimal::Error::ErrorString(format!(
                "'{}' has more than {} decimal places",
                s.trim(),
                Self::SCALE
            )));
        }

        let mut scaled = decimal;
        scaled.rescale(Self::SCALE);
        if scaled.scale() != Self::SCALE {
            return Err(rust_decimal::Error::ErrorString(format!(
                "'{}' is too large for a price",
                s.trim()
            )));
        }
        Ok(Money(scaled))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money::new(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Saturates at the largest representable value instead of overflowing.
impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, count: u32) -> Self::Output {
        Money::new(self.0.saturating_mul(Decimal::from(count)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        assert_eq!(Money::from_str("30").unwrap().to_string(), "30.00");
        assert_eq!(Money::from_str("109.5").unwrap().to_string(), "109.50");
        assert_eq!(Money::from_str("  549.99 ").unwrap().to_string(), "549.99");
    }

    #[test]
    fn test_from_cents_matches_parsed() {
        assert_eq!(Money::from_cents(139999), Money::from_str("1399.99").unwrap());
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
        assert_eq!(Money::from_cents(0), Money::ZERO);
    }

    #[test]
    fn test_multiplication_is_exact() {
        let price = Money::from_str("499.99").unwrap();
        assert_eq!((price * 5).to_string(), "2499.95");
        assert_eq!((price * 0).to_string(), "0.00");
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        let total: Money = ["0.10", "0.20"]
            .iter()
            .map(|s| Money::from_str(s).unwrap())
            .sum();
        assert_eq!(total.to_string(), "0.30");
    }

    #[test]
    fn test_zero_constant() {
        assert!(Money::ZERO.is_zero());
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        assert!(Money::from_str("0.005").is_err());
        assert!(Money::from_str("549.999").is_err());
        // Trailing zeros are not extra precision.
        assert_eq!(Money::from_str("549.9900").unwrap().to_string(), "549.99");
    }

    #[test]
    fn test_rejects_values_too_large_for_cents() {
        assert!(Money::from_str("79228162514264337593543950335").is_err());
        assert!(Money::from_str("792281625142643375935439503.35").is_ok());
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let max = Money::from_str("792281625142643375935439503.35").unwrap();

        let doubled = max * 2;
        assert!(doubled > max);
        assert_eq!(doubled, max * 3);

        let mut sum = doubled + doubled;
        sum += max;
        assert!(sum >= doubled);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize((Money::from_cents(10950),)).unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(written, "109.50\n");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(written.as_bytes());
        let parsed: Vec<(Money,)> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, vec![(Money::from_cents(10950),)]);
    }

    #[test]
    fn test_deserialize_rejects_bad_price() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("0.001\n".as_bytes());
        let parsed: Option<Result<(Money,), csv::Error>> = reader.deserialize().next();
        assert!(parsed.unwrap().is_err());
    }
}
