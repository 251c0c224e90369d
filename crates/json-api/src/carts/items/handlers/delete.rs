//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use sillage_app::domain::carts::records::CartItemUuid;

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = []), ("session_id" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.delete",
    skip(item, depot),
    fields(cart_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let item = item.into_inner();

    tracing::Span::current().record("cart_item_uuid", tracing::field::display(item));

    state
        .app
        .carts
        .remove_item(identity, CartItemUuid::from_uuid(item))
        .await
        .map_err(into_api_error)?;

    tracing::info!(cart_item_uuid = %item, "removed cart item");

    Ok(StatusCode::OK)
}
