//! Catalog Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sillage::prelude::Price;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown availability status: {0}")]
pub struct UnknownAvailabilityStatus(String);

/// Whether a size can currently be added to a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[default]
    InStock,
    OutOfStock,
    Discontinued,
}

impl AvailabilityStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
            Self::Discontinued => "discontinued",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = UnknownAvailabilityStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in_stock" => Ok(Self::InStock),
            "out_of_stock" => Ok(Self::OutOfStock),
            "discontinued" => Ok(Self::Discontinued),
            other => Err(UnknownAvailabilityStatus(other.to_string())),
        }
    }
}

/// Product Size Record, joined with its product's display fields.
#[derive(Debug, Clone)]
pub struct ProductSizeRecord {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub brand_name: String,
    pub size_ml: u32,
    pub sku: String,
    pub price: Price,
    pub sale_price: Option<Price>,
    pub stock_quantity: u64,
    pub reserved_quantity: u64,
    pub availability_status: AvailabilityStatus,

    /// Both the size and its product are active.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductSizeRecord {
    /// Price a shopper pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.sale_price.unwrap_or(self.price)
    }

    /// Stock not yet earmarked by orders.
    #[must_use]
    pub fn available_quantity(&self) -> u64 {
        self.stock_quantity.saturating_sub(self.reserved_quantity)
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.availability_status == AvailabilityStatus::InStock
    }
}
