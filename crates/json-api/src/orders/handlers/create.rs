//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    orders::{
        errors::into_api_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Converts the signed-in user's cart into an order. Stock is reserved, the
/// promotion and gift card are applied and the cart is emptied in one step;
/// on any failure nothing changes.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(order_uuid = tracing::field::Empty, order_number = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let created = state
        .app
        .orders
        .create_order(identity, json.into_inner().into())
        .await
        .map_err(into_api_error);

    let detail = match created {
        Ok(detail) => detail,
        Err(error) => {
            record_checkout(if error.is_server_error() {
                CheckoutOutcome::Failed
            } else {
                CheckoutOutcome::Rejected
            });

            return Err(error);
        }
    };

    record_checkout(CheckoutOutcome::Placed);

    let span = tracing::Span::current();
    span.record("order_uuid", tracing::field::display(detail.order.uuid));
    span.record("order_number", detail.order.order_number.as_str());

    tracing::info!(
        order_number = %detail.order.order_number,
        items = detail.items.len(),
        total = %detail.order.totals.total_amount,
        "order placed"
    );

    res.add_header(LOCATION, format!("/api/orders/{}", detail.order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(detail.into()))
}
