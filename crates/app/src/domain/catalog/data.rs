//! Catalog Data

use serde::Deserialize;
use sillage::prelude::Price;

use crate::domain::catalog::records::{AvailabilityStatus, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand_name: String,
}

/// New Product Size Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductSize {
    pub product_uuid: ProductUuid,
    pub size_ml: u32,
    pub sku: String,
    pub price: Price,
    pub sale_price: Option<Price>,
    pub stock_quantity: u64,
    pub availability_status: AvailabilityStatus,
}

/// Catalog fixture used by the import command.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFixture {
    pub products: Vec<ProductFixture>,
}

/// One product and its sizes in a catalog fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand_name: String,
    #[serde(default)]
    pub sizes: Vec<ProductSizeFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSizeFixture {
    pub size_ml: u32,
    pub sku: String,
    pub price: Price,
    #[serde(default)]
    pub sale_price: Option<Price>,
    #[serde(default)]
    pub stock_quantity: u64,
    #[serde(default)]
    pub availability_status: AvailabilityStatus,
}

impl ProductFixture {
    /// Split into the product row and its size rows.
    #[must_use]
    pub fn into_parts(self) -> (NewProduct, Vec<NewProductSize>) {
        let product_uuid = self.uuid;

        let sizes = self
            .sizes
            .into_iter()
            .map(|size| NewProductSize {
                product_uuid,
                size_ml: size.size_ml,
                sku: size.sku,
                price: size.price,
                sale_price: size.sale_price,
                stock_quantity: size.stock_quantity,
                availability_status: size.availability_status,
            })
            .collect();

        (
            NewProduct {
                uuid: product_uuid,
                name: self.name,
                brand_name: self.brand_name,
            },
            sizes,
        )
    }
}
