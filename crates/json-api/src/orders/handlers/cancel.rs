//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use sillage_app::domain::orders::records::OrderUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Cancels a pending, unfulfilled order. Reserved stock is released and any
/// gift-card amount is returned to the card.
#[endpoint(tags("orders"), summary = "Cancel Order", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "orders.cancel",
    skip(order, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let detail = state
        .app
        .orders
        .cancel_order(identity, OrderUuid::from_uuid(order))
        .await
        .map_err(into_api_error)?;

    tracing::info!(order_number = %detail.order.order_number, "order cancelled");

    Ok(Json(detail.into()))
}
