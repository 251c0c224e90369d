//! Test Helpers

use sillage::prelude::{OrderTotals, Price};

use crate::domain::{
    carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartItemRecord},
    catalog::{
        data::NewProductSize,
        records::{AvailabilityStatus, ProductUuid},
    },
    identity::{Identity, SessionId, SessionIdError},
    orders::{data::NewOrder, records::Address},
};

use super::TestContext;

/// An in-stock size priced at `price` minor units, with SKU `<product>-<size_ml>`.
pub(crate) fn new_size(product: ProductUuid, size_ml: u32, price: u64, stock: u64) -> NewProductSize {
    NewProductSize {
        product_uuid: product,
        size_ml,
        sku: format!("{product}-{size_ml}"),
        price: Price::new(price),
        sale_price: None,
        stock_quantity: stock,
        availability_status: AvailabilityStatus::InStock,
    }
}

pub(crate) fn guest(session: &str) -> Result<Identity, SessionIdError> {
    Ok(Identity::GuestSession(SessionId::parse(session)?))
}

/// Add a line at the live price without options.
pub(crate) async fn add_line(
    ctx: &TestContext,
    identity: &Identity,
    product: ProductUuid,
    size_ml: u32,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            identity,
            NewCartItem {
                product_uuid: product,
                size_ml,
                quantity,
                unit_price: None,
                gift_wrap: false,
                sample_included: false,
            },
        )
        .await
}

pub(crate) fn totals(subtotal: u64, tax: u64, shipping: u64, discount: u64, total: u64) -> OrderTotals {
    OrderTotals {
        subtotal: Price::new(subtotal),
        tax_amount: Price::new(tax),
        shipping_cost: Price::new(shipping),
        discount_amount: Price::new(discount),
        total_amount: Price::new(total),
    }
}

pub(crate) fn address() -> Address {
    Address {
        name: "Ada Lovelace".to_string(),
        line1: "12 Rue du Parfum".to_string(),
        line2: None,
        city: "Grasse".to_string(),
        region: None,
        postal_code: "06130".to_string(),
        country: "FR".to_string(),
    }
}

/// A standard-shipping checkout with the given totals and no codes.
pub(crate) fn new_order(totals: OrderTotals) -> NewOrder {
    NewOrder {
        shipping_address: address(),
        billing_address: address(),
        shipping_method: "standard".to_string(),
        customer_email: "ada@example.com".to_string(),
        customer_phone: None,
        totals,
        promotion_code: None,
        gift_card_code: None,
    }
}
