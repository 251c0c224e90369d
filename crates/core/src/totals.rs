//! Order Totals
//!
//! Tax and shipping are computed outside this system, so the client submits
//! every component of the order total. These helpers check that the parts the
//! server can derive agree with what was submitted and that the arithmetic
//! adds up.

use thiserror::Error;

use crate::prices::{Price, PriceError};

/// Errors raised while verifying order totals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    /// Submitted subtotal disagrees with the cart.
    #[error("subtotal {actual} does not match cart subtotal {expected}")]
    SubtotalMismatch {
        /// Subtotal derived from the cart lines.
        expected: Price,
        /// Subtotal submitted by the client.
        actual: Price,
    },

    /// Submitted discount disagrees with the applied promotion.
    #[error("discount {actual} does not match applicable discount {expected}")]
    DiscountMismatch {
        /// Discount derived from the promotion.
        expected: Price,
        /// Discount submitted by the client.
        actual: Price,
    },

    /// Submitted total disagrees with the sum of its parts.
    #[error("total {actual} does not match computed total {expected}")]
    TotalMismatch {
        /// Total derived from the components.
        expected: Price,
        /// Total submitted by the client.
        actual: Price,
    },

    /// Discount is larger than the order it applies to.
    #[error("discount exceeds the order amount")]
    DiscountExceedsOrder,

    /// Component arithmetic overflowed.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Order totals as submitted by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Price,

    /// Tax charged on the order.
    pub tax_amount: Price,

    /// Shipping charged on the order.
    pub shipping_cost: Price,

    /// Promotion discount.
    pub discount_amount: Price,

    /// Amount the shopper pays.
    pub total_amount: Price,
}

impl OrderTotals {
    /// `subtotal + tax + shipping - discount`.
    ///
    /// # Errors
    ///
    /// Returns an error when the sum overflows or the discount exceeds the
    /// order amount.
    pub fn amount_before_gift_card(&self) -> Result<Price, TotalsError> {
        self.subtotal
            .checked_add(self.tax_amount)?
            .checked_add(self.shipping_cost)?
            .checked_sub(self.discount_amount)
            .map_err(|_underflow| TotalsError::DiscountExceedsOrder)
    }

    /// Check the submitted totals against the server-derived subtotal,
    /// discount and gift-card amount.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found, checked in order: subtotal, discount,
    /// total.
    pub fn verify(
        &self,
        cart_subtotal: Price,
        discount: Price,
        gift_card_amount: Price,
    ) -> Result<(), TotalsError> {
        if self.subtotal != cart_subtotal {
            return Err(TotalsError::SubtotalMismatch {
                expected: cart_subtotal,
                actual: self.subtotal,
            });
        }

        if self.discount_amount != discount {
            return Err(TotalsError::DiscountMismatch {
                expected: discount,
                actual: self.discount_amount,
            });
        }

        let expected = self
            .amount_before_gift_card()?
            .checked_sub(gift_card_amount)?;

        if self.total_amount != expected {
            return Err(TotalsError::TotalMismatch {
                expected,
                actual: self.total_amount,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn totals(subtotal: u64, tax: u64, shipping: u64, discount: u64, total: u64) -> OrderTotals {
        OrderTotals {
            subtotal: Price::new(subtotal),
            tax_amount: Price::new(tax),
            shipping_cost: Price::new(shipping),
            discount_amount: Price::new(discount),
            total_amount: Price::new(total),
        }
    }

    #[test]
    fn verify_accepts_consistent_totals() -> TestResult {
        totals(16_500, 1_320, 999, 0, 18_819).verify(Price::new(16_500), Price::ZERO, Price::ZERO)?;

        Ok(())
    }

    #[test]
    fn verify_subtracts_gift_card() -> TestResult {
        totals(16_500, 1_320, 999, 0, 13_819).verify(
            Price::new(16_500),
            Price::ZERO,
            Price::new(5_000),
        )?;

        Ok(())
    }

    #[test]
    fn verify_rejects_wrong_subtotal() {
        let result =
            totals(16_000, 1_320, 999, 0, 18_319).verify(Price::new(16_500), Price::ZERO, Price::ZERO);

        assert_eq!(
            result,
            Err(TotalsError::SubtotalMismatch {
                expected: Price::new(16_500),
                actual: Price::new(16_000),
            })
        );
    }

    #[test]
    fn verify_rejects_unearned_discount() {
        let result =
            totals(16_500, 1_320, 999, 1_000, 17_819).verify(Price::new(16_500), Price::ZERO, Price::ZERO);

        assert!(
            matches!(result, Err(TotalsError::DiscountMismatch { .. })),
            "expected DiscountMismatch, got {result:?}"
        );
    }

    #[test]
    fn verify_rejects_wrong_total() {
        let result =
            totals(16_500, 1_320, 999, 0, 18_818).verify(Price::new(16_500), Price::ZERO, Price::ZERO);

        assert_eq!(
            result,
            Err(TotalsError::TotalMismatch {
                expected: Price::new(18_819),
                actual: Price::new(18_818),
            })
        );
    }

    #[test]
    fn discount_larger_than_order_is_rejected() {
        let result = totals(100, 0, 0, 200, 0).amount_before_gift_card();

        assert_eq!(result, Err(TotalsError::DiscountExceedsOrder));
    }
}
