//! Sillage prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketLine, BasketSummary},
    discounts::{Adjustment, DiscountError, Promotion, PromotionKind, apply_promotion},
    gift_cards::{GiftCardBalance, Redemption},
    prices::{Price, PriceError},
    totals::{OrderTotals, TotalsError},
};
