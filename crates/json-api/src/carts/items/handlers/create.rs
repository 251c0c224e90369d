//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sillage::prelude::Price;
use sillage_app::domain::{carts::data::NewCartItem, catalog::records::ProductUuid};

use crate::{
    carts::{errors::into_api_error, models::CartItemResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: Uuid,
    pub size_ml: u32,
    pub quantity: u32,

    /// Price the shopper saw, in minor units
    #[serde(default)]
    pub unit_price: Option<u64>,

    #[serde(default)]
    pub gift_wrap: bool,

    #[serde(default)]
    pub sample_included: bool,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            product_uuid: ProductUuid::from_uuid(request.product_id),
            size_ml: request.size_ml,
            quantity: request.quantity,
            unit_price: request.unit_price.map(Price::new),
            gift_wrap: request.gift_wrap,
            sample_included: request.sample_included,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds units of a product size to the caller's cart, creating the cart on
/// first use. Adding a size already in the cart raises that line's quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = []), ("session_id" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty, size_ml = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let request = json.into_inner();

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("size_ml", request.size_ml);

    let item = state
        .app
        .carts
        .add_item(identity, request.into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/api/cart/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
