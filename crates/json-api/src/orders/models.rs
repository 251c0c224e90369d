//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sillage::prelude::{OrderTotals, Price};
use sillage_app::domain::orders::{
    data::NewOrder,
    records::{Address, OrderDetail, OrderItemRecord, OrderRecord},
};

/// Postal Address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressPayload {
    pub name: String,
    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    pub postal_code: String,

    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Address {
            name: payload.name,
            line1: payload.line1,
            line2: payload.line2,
            city: payload.city,
            region: payload.region,
            postal_code: payload.postal_code,
            country: payload.country,
        }
    }
}

impl From<Address> for AddressPayload {
    fn from(address: Address) -> Self {
        Self {
            name: address.name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            region: address.region,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

/// Create Order Request
///
/// Amounts are in minor units and must agree with what the server derives
/// from the cart, promotion and gift card.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub shipping_address: AddressPayload,
    pub billing_address: AddressPayload,
    pub shipping_method: String,
    pub customer_email: String,

    #[serde(default)]
    pub customer_phone: Option<String>,

    pub subtotal: u64,
    pub tax_amount: u64,
    pub shipping_cost: u64,

    #[serde(default)]
    pub discount_amount: u64,

    pub total_amount: u64,

    #[serde(default)]
    pub promotion_code: Option<String>,

    #[serde(default)]
    pub gift_card_code: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            shipping_address: request.shipping_address.into(),
            billing_address: request.billing_address.into(),
            shipping_method: request.shipping_method,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            totals: OrderTotals {
                subtotal: Price::new(request.subtotal),
                tax_amount: Price::new(request.tax_amount),
                shipping_cost: Price::new(request.shipping_cost),
                discount_amount: Price::new(request.discount_amount),
                total_amount: Price::new(request.total_amount),
            },
            promotion_code: request.promotion_code,
            gift_card_code: request.gift_card_code,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub brand_name: String,
    pub sku: String,
    pub size_ml: u32,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
    pub gift_wrap: bool,
    pub sample_included: bool,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            id: item.uuid.into(),
            product_id: item.product_uuid.into(),
            product_name: item.product_name,
            brand_name: item.brand_name,
            sku: item.sku,
            size_ml: item.size_ml,
            quantity: item.quantity,
            unit_price: item.unit_price.minor_units(),
            line_total: item.line_total.minor_units(),
            gift_wrap: item.gift_wrap,
            sample_included: item.sample_included,
        }
    }
}

/// Order Response
///
/// `items` is omitted from order listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub order_status: String,
    pub payment_status: String,
    pub fulfillment_status: String,
    pub subtotal: u64,
    pub tax_amount: u64,
    pub shipping_cost: u64,
    pub discount_amount: u64,
    pub gift_card_amount: u64,
    pub total_amount: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_card_code: Option<String>,

    pub shipping_address: AddressPayload,
    pub billing_address: AddressPayload,
    pub shipping_method: String,
    pub customer_email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,

    pub created_at: String,
    pub updated_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemResponse>>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into(),
            order_number: order.order_number,
            order_status: order.order_status.to_string(),
            payment_status: order.payment_status.to_string(),
            fulfillment_status: order.fulfillment_status.to_string(),
            subtotal: order.totals.subtotal.minor_units(),
            tax_amount: order.totals.tax_amount.minor_units(),
            shipping_cost: order.totals.shipping_cost.minor_units(),
            discount_amount: order.totals.discount_amount.minor_units(),
            gift_card_amount: order.gift_card_amount.minor_units(),
            total_amount: order.totals.total_amount.minor_units(),
            promotion_code: order.promotion_code,
            gift_card_code: order.gift_card_code,
            shipping_address: order.shipping_address.into(),
            billing_address: order.billing_address.into(),
            shipping_method: order.shipping_method,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            cancelled_at: order.cancelled_at.map(|at| at.to_string()),
            items: None,
        }
    }
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            items: Some(detail.items.into_iter().map(Into::into).collect()),
            ..Self::from(detail.order)
        }
    }
}
