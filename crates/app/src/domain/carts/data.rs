//! Cart Data

use sillage::prelude::Price;

use crate::domain::{carts::records::CartItemRecord, catalog::records::ProductUuid};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub size_ml: u32,
    pub quantity: u32,

    /// Price the shopper saw. Rejected when it no longer matches the catalog.
    pub unit_price: Option<Price>,
    pub gift_wrap: bool,
    pub sample_included: bool,
}

/// Cart Item Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartItemUpdate {
    /// New quantity; zero removes the line.
    pub quantity: Option<u32>,
    pub gift_wrap: Option<bool>,
    pub sample_included: Option<bool>,
}

/// Outcome of a cart item update.
#[derive(Debug, Clone)]
pub enum UpdatedCartItem {
    Updated(CartItemRecord),
    Removed,
}
