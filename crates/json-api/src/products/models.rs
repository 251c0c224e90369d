//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sillage_app::domain::catalog::records::ProductSizeRecord;

/// Product Size Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSizeResponse {
    pub product_id: Uuid,
    pub product_name: String,
    pub brand_name: String,
    pub size_ml: u32,
    pub sku: String,

    /// List price, in minor units
    pub price: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<u64>,

    /// Price charged when added to a cart now
    pub effective_price: u64,

    /// Stock not yet reserved by orders
    pub available_quantity: u64,

    /// `in_stock`, `out_of_stock` or `discontinued`
    pub availability_status: String,
}

impl From<ProductSizeRecord> for ProductSizeResponse {
    fn from(size: ProductSizeRecord) -> Self {
        Self {
            product_id: size.product_uuid.into(),
            effective_price: size.effective_price().minor_units(),
            available_quantity: size.available_quantity(),
            availability_status: size.availability_status.to_string(),
            product_name: size.product_name,
            brand_name: size.brand_name,
            size_ml: size.size_ml,
            sku: size.sku,
            price: size.price.minor_units(),
            sale_price: size.sale_price.map(|price| price.minor_units()),
        }
    }
}
