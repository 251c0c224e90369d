//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sillage_app::domain::carts::{
    records::CartItemRecord,
    views::{CartLine, CartView},
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The cart, or `null` before the first item is added
    pub cart_id: Option<Uuid>,

    pub items: Vec<CartLineResponse>,

    /// Sum of line totals, in minor units
    pub subtotal: u64,

    /// Sum of quantities
    pub item_count: u64,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            cart_id: view.cart_uuid.map(Into::into),
            items: view.items.into_iter().map(Into::into).collect(),
            subtotal: view.subtotal.minor_units(),
            item_count: view.item_count,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub brand_name: String,
    pub sku: String,
    pub size_ml: u32,
    pub quantity: u32,

    /// Price captured when the item was added
    pub unit_price: u64,

    /// Price the catalog charges now
    pub current_price: u64,
    pub price_changed: bool,
    pub line_total: u64,
    pub available_quantity: u64,
    pub gift_wrap: bool,
    pub sample_included: bool,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        let CartLine {
            line,
            price_changed,
            line_total,
        } = line;

        Self {
            id: line.item.uuid.into(),
            product_id: line.item.product_uuid.into(),
            product_name: line.product_name,
            brand_name: line.brand_name,
            sku: line.sku,
            size_ml: line.item.size_ml,
            quantity: line.item.quantity,
            unit_price: line.item.unit_price.minor_units(),
            current_price: line.current_price.minor_units(),
            price_changed,
            line_total: line_total.minor_units(),
            available_quantity: line.available_quantity,
            gift_wrap: line.item.gift_wrap,
            sample_included: line.item.sample_included,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub size_ml: u32,
    pub quantity: u32,
    pub unit_price: u64,
    pub gift_wrap: bool,
    pub sample_included: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            id: item.uuid.into(),
            cart_id: item.cart_uuid.into(),
            product_id: item.product_uuid.into(),
            size_ml: item.size_ml,
            quantity: item.quantity,
            unit_price: item.unit_price.minor_units(),
            gift_wrap: item.gift_wrap,
            sample_included: item.sample_included,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}
