//! Orders Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sillage::prelude::{OrderTotals, Price};
use thiserror::Error;

use crate::{
    domain::{catalog::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownStatus {
    kind: &'static str,
    value: String,
}

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident as $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($label => Ok(Self::$variant),)+
                    other => Err(UnknownStatus {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

status_enum! {
    /// Where an order is in its lifecycle. Transitions past `Pending` happen
    /// outside this system, except cancellation.
    OrderStatus as "order status" {
        Pending => "pending",
        Confirmed => "confirmed",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

status_enum! {
    PaymentStatus as "payment status" {
        Pending => "pending",
        Paid => "paid",
        Refunded => "refunded",
        Failed => "failed",
    }
}

status_enum! {
    FulfillmentStatus as "fulfillment status" {
        Unfulfilled => "unfulfilled",
        Partial => "partial",
        Fulfilled => "fulfilled",
    }
}

/// Postal address, stored as JSON on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub postal_code: String,

    /// ISO 3166-1 alpha-2.
    pub country: String,
}

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub order_number: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub totals: OrderTotals,
    pub gift_card_amount: Price,
    pub promotion_code: Option<String>,
    pub gift_card_code: Option<String>,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub shipping_method: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
}

impl OrderRecord {
    /// Only orders nobody has started working on can be cancelled.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        self.order_status == OrderStatus::Pending
            && self.fulfillment_status == FulfillmentStatus::Unfulfilled
    }
}

/// Order Item Record, a snapshot of a cart line at purchase time.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub brand_name: String,
    pub size_ml: u32,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
    pub sku: String,
    pub gift_wrap: bool,
    pub sample_included: bool,
    pub created_at: Timestamp,
}

/// An order with its items.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}
