//! Monetary amounts carried by card and transaction notifications.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Currencies the platform accepts from the partner bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    MXN,
    EUR,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD | Currency::MXN | Currency::EUR => 2,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD | Currency::MXN => "$",
            Currency::EUR => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (cents)
/// to avoid floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::InvalidAmount(amount.to_string()));
        }
        Ok(Self { amount, currency })
    }

    /// Converts a major-unit decimal (as BBVA sends it) into minor units.
    ///
    /// Sub-cent precision is rounded half away from zero.
    pub fn from_major(amount: Decimal, currency: Currency) -> Result<Self, DomainError> {
        let scale = Decimal::from(10_i64.pow(currency.decimal_places()));
        let minor = amount
            .checked_mul(scale)
            .ok_or_else(|| DomainError::InvalidAmount(amount.to_string()))?
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or_else(|| DomainError::InvalidAmount(amount.to_string()))?;

        Self::new(minor, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.amount / 100;
        let minor = (self.amount % 100).abs();
        write!(f, "{}{}.{:02}", self.currency.symbol(), major, minor)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_from_major() {
        let money = Money::from_major(Decimal::from_str("12.34").unwrap(), Currency::USD).unwrap();
        assert_eq!(money.amount(), 1234);
        assert_eq!(money.currency(), Currency::USD);
    }

    #[test]
    fn test_from_major_rounds_sub_cent() {
        let money = Money::from_major(Decimal::from_str("0.005").unwrap(), Currency::USD).unwrap();
        assert_eq!(money.amount(), 1);
    }

    #[test]
    fn test_negative_money_fails() {
        let result = Money::from_major(Decimal::from_str("-1.00").unwrap(), Currency::USD);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_from_major_overflow_fails() {
        let result = Money::from_major(Decimal::MAX, Currency::USD);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_from_major_beyond_i64_fails() {
        let huge = Decimal::from_str("100000000000000000000").unwrap();
        let result = Money::from_major(huge, Currency::USD);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_money_display() {
        let money = Money::new(1050, Currency::EUR).unwrap();
        assert_eq!(format!("{}", money), "€10.50");
    }
}
