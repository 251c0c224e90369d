//! Discounts
//!
//! Order-level promotions applied to a cart subtotal before totals are
//! finalised.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

use crate::prices::Price;

/// Basis points in one whole (100%).
pub const BASIS_POINTS_PER_WHOLE: u32 = 10_000;

/// Errors specific to discount calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// The subtotal is below the promotion's minimum spend.
    #[error("promotion {code} requires a subtotal of at least {minimum}")]
    MinimumNotMet {
        /// Promotion code.
        code: String,
        /// Required subtotal.
        minimum: Price,
    },

    /// Percentage is above 100%.
    #[error("percentage of {0} basis points is out of range")]
    PercentOutOfRange(u32),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,
}

/// How a promotion reduces an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionKind {
    /// Take a percentage (in basis points) off the subtotal.
    Percentage(u32),

    /// Take a fixed amount off the subtotal, never more than the subtotal.
    FixedAmount(Price),

    /// Waive the shipping cost.
    FreeShipping,
}

/// A redeemable promotion code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// Code the shopper enters.
    pub code: String,

    /// Discount behaviour.
    pub kind: PromotionKind,

    /// Minimum subtotal for the promotion to apply.
    pub minimum_subtotal: Price,
}

/// The effect of a promotion on an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Adjustment {
    /// Amount taken off the order.
    pub discount: Price,
}

/// Work out the discount a promotion grants for the given subtotal and
/// shipping cost.
///
/// # Errors
///
/// Returns [`DiscountError::MinimumNotMet`] when the subtotal is too small, or
/// a conversion error when a percentage cannot be represented.
pub fn apply_promotion(
    promotion: &Promotion,
    subtotal: Price,
    shipping_cost: Price,
) -> Result<Adjustment, DiscountError> {
    if subtotal < promotion.minimum_subtotal {
        return Err(DiscountError::MinimumNotMet {
            code: promotion.code.clone(),
            minimum: promotion.minimum_subtotal,
        });
    }

    let discount = match promotion.kind {
        PromotionKind::Percentage(basis_points) => {
            Price::new(percent_of_minor(basis_points, subtotal.minor_units())?)
        }
        PromotionKind::FixedAmount(amount) => amount.min(subtotal),
        PromotionKind::FreeShipping => shipping_cost,
    };

    Ok(Adjustment { discount })
}

/// Calculate `basis_points / 10_000` of a minor unit amount, rounding half
/// away from zero.
///
/// # Errors
///
/// Returns an error if the percentage is above 100% or the result cannot be
/// represented.
pub fn percent_of_minor(basis_points: u32, minor: u64) -> Result<u64, DiscountError> {
    if basis_points > BASIS_POINTS_PER_WHOLE {
        return Err(DiscountError::PercentOutOfRange(basis_points));
    }

    let percent = Decimal::new(i64::from(basis_points), 4);
    let minor = Decimal::from_u64(minor).ok_or(DiscountError::PercentConversion)?;

    percent
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::PercentConversion)
}
