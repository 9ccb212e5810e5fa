//! Amount - Exact-width integer wrapper for pooled funds
//!
//! Amounts are counted in the smallest indivisible unit and never pass
//! through floating point. In JSON they are written as decimal strings so
//! clients without 128-bit integers do not lose precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Empty amount")]
    Empty,

    #[error("Amount must contain only digits: {0}")]
    InvalidDigits(String),

    #[error("Amount out of range: {0}")]
    Overflow(String),
}

/// A non-negative amount of funds in the smallest unit.
///
/// # Example
/// ```
/// use multisig_core::Amount;
///
/// let amount: Amount = "1000".parse().unwrap();
/// assert_eq!(amount.value(), 1000);
///
/// // Signs and fractions are rejected
/// assert!("-5".parse::<Amount>().is_err());
/// assert!("1.5".parse::<Amount>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw unit count
    #[inline]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Get the inner unit count
    #[inline]
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        // u128::from_str accepts a leading '+', we don't
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::InvalidDigits(s.to_string()));
        }

        s.parse::<u128>()
            .map(Amount)
            .map_err(|_| AmountError::Overflow(s.to_string()))
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}
