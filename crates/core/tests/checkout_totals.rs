//! End-to-end checkout arithmetic: cart lines through promotion, gift card and
//! totals verification.

use sillage::prelude::*;
use testresult::TestResult;

#[test]
fn single_line_checkout_without_adjustments() -> TestResult {
    let basket = Basket::with_lines([BasketLine::new(1, Price::new(16_500))]);
    let summary = basket.summary()?;

    let totals = OrderTotals {
        subtotal: Price::new(16_500),
        tax_amount: Price::new(1_320),
        shipping_cost: Price::new(999),
        discount_amount: Price::ZERO,
        total_amount: Price::new(18_819),
    };

    totals.verify(summary.subtotal, Price::ZERO, Price::ZERO)?;

    assert_eq!(summary.item_count, 1);
    assert_eq!(totals.total_amount.to_string(), "188.19");

    Ok(())
}

#[test]
fn percentage_promotion_then_gift_card() -> TestResult {
    let basket = Basket::with_lines([
        BasketLine::new(2, Price::new(9_500)),
        BasketLine::new(1, Price::new(4_000)),
    ]);
    let summary = basket.summary()?;

    let promotion = Promotion {
        code: "WELCOME10".to_string(),
        kind: PromotionKind::Percentage(1_000),
        minimum_subtotal: Price::new(10_000),
    };

    let shipping = Price::new(999);
    let tax = Price::new(1_840);

    let adjustment = apply_promotion(&promotion, summary.subtotal, shipping)?;

    assert_eq!(summary.subtotal, Price::new(23_000));
    assert_eq!(adjustment.discount, Price::new(2_300));

    let mut totals = OrderTotals {
        subtotal: summary.subtotal,
        tax_amount: tax,
        shipping_cost: shipping,
        discount_amount: adjustment.discount,
        total_amount: Price::ZERO,
    };

    let due = totals.amount_before_gift_card()?;
    let redemption = GiftCardBalance::new(Price::new(5_000)).redeem(due);

    totals.total_amount = due.checked_sub(redemption.applied)?;

    totals.verify(summary.subtotal, adjustment.discount, redemption.applied)?;

    assert_eq!(due, Price::new(23_539));
    assert_eq!(totals.total_amount, Price::new(18_539));
    assert_eq!(redemption.remaining, Price::ZERO);

    Ok(())
}

#[test]
fn gift_card_covering_whole_order_leaves_zero_total() -> TestResult {
    let totals = OrderTotals {
        subtotal: Price::new(4_000),
        tax_amount: Price::new(320),
        shipping_cost: Price::ZERO,
        discount_amount: Price::ZERO,
        total_amount: Price::ZERO,
    };

    let redemption = GiftCardBalance::new(Price::new(10_000)).redeem(totals.amount_before_gift_card()?);

    totals.verify(Price::new(4_000), Price::ZERO, redemption.applied)?;

    assert_eq!(redemption.remaining, Price::new(5_680));

    Ok(())
}
