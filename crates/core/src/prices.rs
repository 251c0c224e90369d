//! Prices

use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by price arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The result does not fit in a `u64` of minor units.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// A subtraction would have produced a negative amount.
    #[error("price arithmetic underflowed")]
    Underflow,
}

/// Represents a price in pence/cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A price of nothing.
    pub const ZERO: Self = Self { value: 0 };

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Minor units held by this price.
    pub const fn minor_units(self) -> u64 {
        self.value
    }

    /// Add two prices.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] when the sum exceeds `u64::MAX`.
    pub fn checked_add(self, other: Self) -> Result<Self, PriceError> {
        self.value
            .checked_add(other.value)
            .map(Self::new)
            .ok_or(PriceError::Overflow)
    }

    /// Subtract `other` from this price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Underflow`] when `other` is larger than `self`.
    pub fn checked_sub(self, other: Self) -> Result<Self, PriceError> {
        self.value
            .checked_sub(other.value)
            .map(Self::new)
            .ok_or(PriceError::Underflow)
    }

    /// Subtract `other`, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self::new(self.value.saturating_sub(other.value))
    }

    /// Multiply a unit price by a quantity to get a line total.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] when the product exceeds `u64::MAX`.
    pub fn times(self, quantity: u32) -> Result<Self, PriceError> {
        self.value
            .checked_mul(u64::from(quantity))
            .map(Self::new)
            .ok_or(PriceError::Overflow)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.value / 100, self.value % 100)
    }
}
