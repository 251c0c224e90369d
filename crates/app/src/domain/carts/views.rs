//! Cart Views

use sillage::prelude::{Basket, BasketLine, Price, PriceError};

use crate::domain::carts::records::{CartLineRecord, CartUuid};

/// A cart line as shown to the shopper.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub line: CartLineRecord,

    /// The live price differs from the price captured at add time.
    pub price_changed: bool,

    /// `quantity * unit_price`.
    pub line_total: Price,
}

/// The shopper's current cart.
#[derive(Debug, Clone, Default)]
pub struct CartView {
    /// `None` until the first item is added.
    pub cart_uuid: Option<CartUuid>,
    pub items: Vec<CartLine>,
    pub subtotal: Price,

    /// Sum of quantities, not the number of lines.
    pub item_count: u64,
}

impl CartView {
    /// Build a view from a cart's lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total or the subtotal overflows.
    pub fn from_lines(
        cart_uuid: Option<CartUuid>,
        lines: Vec<CartLineRecord>,
    ) -> Result<Self, PriceError> {
        let basket: Basket = lines
            .iter()
            .map(|line| BasketLine::new(line.item.quantity, line.item.unit_price))
            .collect();

        let summary = basket.summary()?;

        let items = lines
            .into_iter()
            .map(|line| {
                let line_total = line.item.unit_price.times(line.item.quantity)?;

                Ok(CartLine {
                    price_changed: line.current_price != line.item.unit_price,
                    line_total,
                    line,
                })
            })
            .collect::<Result<Vec<_>, PriceError>>()?;

        Ok(Self {
            cart_uuid,
            items,
            subtotal: summary.subtotal,
            item_count: summary.item_count,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::{
        carts::records::{CartItemRecord, CartItemUuid},
        catalog::records::{AvailabilityStatus, ProductUuid},
    };

    use super::*;

    fn line(quantity: u32, unit_price: u64, current_price: u64) -> CartLineRecord {
        CartLineRecord {
            item: CartItemRecord {
                uuid: CartItemUuid::new(),
                cart_uuid: CartUuid::new(),
                product_uuid: ProductUuid::new(),
                size_ml: 50,
                quantity,
                unit_price: Price::new(unit_price),
                gift_wrap: false,
                sample_included: false,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            product_name: "Oud Noir".to_string(),
            brand_name: "Maison Verre".to_string(),
            sku: "MV-OUD-50".to_string(),
            current_price: Price::new(current_price),
            available_quantity: 10,
            availability_status: AvailabilityStatus::InStock,
            is_active: true,
        }
    }

    #[test]
    fn item_count_is_sum_of_quantities() -> TestResult {
        let view = CartView::from_lines(Some(CartUuid::new()), vec![line(7, 1_000, 1_000)])?;

        assert_eq!(view.item_count, 7);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.subtotal, Price::new(7_000));

        Ok(())
    }

    #[test]
    fn price_changed_compares_live_and_snapshot_prices() -> TestResult {
        let view = CartView::from_lines(
            Some(CartUuid::new()),
            vec![line(1, 16_500, 16_500), line(2, 9_000, 9_500)],
        )?;

        let flags: Vec<bool> = view.items.iter().map(|item| item.price_changed).collect();

        assert_eq!(flags, vec![false, true]);
        assert_eq!(view.subtotal, Price::new(34_500));
        assert_eq!(view.item_count, 3);

        Ok(())
    }

    #[test]
    fn empty_view_has_no_cart() -> TestResult {
        let view = CartView::from_lines(None, Vec::new())?;

        assert!(view.cart_uuid.is_none());
        assert!(view.is_empty());
        assert_eq!(view.subtotal, Price::ZERO);
        assert_eq!(view.item_count, 0);

        Ok(())
    }
}
