//! Fixed-point monetary amount with 4 decimal places.
//!
//! Wraps `rust_decimal` and keeps every value at scale 4, so parsing,
//! arithmetic and formatting never drift into floating-point rounding.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount held at exactly 4 fractional digits.
///
/// Arithmetic is checked: ledger code adds and subtracts through
/// [`Amount::checked_add`] and [`Amount::checked_sub`] and treats `None` as an
/// overflow of the record being applied.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use transaction_ledger::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.5000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Number of fractional digits kept.
    pub const SCALE: u32 = 4;

    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Wraps a `Decimal`, rounding it to 4 fractional digits.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        if normalized.is_zero() {
            // "-0.0000" must never reach the output
            normalized.set_sign_positive(true);
        }
        Amount(normalized)
    }

    /// Like [`Amount::new`], but `None` when the value is too large to keep
    /// 4 fractional digits.
    pub fn checked_new(value: Decimal) -> Option<Self> {
        let amount = Amount::new(value);
        (amount.0.scale() == Self::SCALE).then_some(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` for values strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).and_then(Amount::checked_new)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).and_then(Amount::checked_new)
    }

    /// Adds without panicking, clamping at the largest representable value.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Amount::new(self.0.saturating_add(rhs.0))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())?;
        Amount::checked_new(value).ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[rstest]
    #[case::integer("1", "1.0000")]
    #[case::one_digit("1.5", "1.5000")]
    #[case::full_precision("1.1234", "1.1234")]
    #[case::padded("  2.5  ", "2.5000")]
    #[case::excess_digits_round("0.00006", "0.0001")]
    #[case::negative_zero("-0.0", "0.0000")]
    fn parses_to_four_places(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(amt(input).to_string(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("79228162514264337593543950335").is_err());
    }

    #[test]
    fn checked_arithmetic_keeps_scale() {
        let a = amt("1.5");
        let b = amt("2.5");

        assert_eq!(a.checked_add(b).unwrap().to_string(), "4.0000");
        assert_eq!(b.checked_sub(a).unwrap().to_string(), "1.0000");
        assert_eq!(a.checked_sub(b).unwrap().to_string(), "-1.0000");
    }

    #[test]
    fn checked_add_reports_overflow() {
        let huge = amt("7922816251426433759354395");
        assert!(huge.checked_add(huge).is_none());
    }

    #[test]
    fn saturating_add_never_panics() {
        let huge = amt("7922816251426433759354395");

        assert_eq!(amt("1.5").saturating_add(amt("2.5")).to_string(), "4.0000");
        assert!(huge.saturating_add(huge) > huge);
        assert!(!huge.saturating_add(huge).is_negative());
    }

    #[test]
    fn sign_queries() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::ZERO.is_negative());
        assert!(amt("-0.0001").is_negative());
        assert!(!amt("0.0001").is_negative());
    }
}
