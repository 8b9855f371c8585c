//! Monetary amounts.
//!
//! An [`Amount`] is always quantized to two fraction digits with banker's rounding
//! and fits the `DECIMAL(7, 2)` column the charge log is stored in.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fraction digits every amount carries.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest chargeable amount (7 significant digits, 2 after the point).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(9_999_999, 0, 0, false, AMOUNT_SCALE);

/// A strictly positive amount quantized to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Round `value` to cents (half-to-even) and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rounded value is zero or negative, or exceeds
    /// [`MAX_AMOUNT`].
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        let mut rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(AMOUNT_SCALE);

        if rounded <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }
        if rounded > MAX_AMOUNT {
            return Err(AmountError::TooLarge(value));
        }
        Ok(Self(rounded))
    }

    /// Return the quantized decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::str::FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str_exact(s.trim()).map_err(|_| AmountError::Malformed(s.into()))?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when building an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount rounds to zero or below.
    #[error("amount must be positive: {0}")]
    NotPositive(Decimal),

    /// The amount does not fit the charge log column.
    #[error("amount exceeds maximum of {max}: {0}", max = MAX_AMOUNT)]
    TooLarge(Decimal),

    /// The input is not a decimal number.
    #[error("malformed amount: {0:?}")]
    Malformed(String),
}
