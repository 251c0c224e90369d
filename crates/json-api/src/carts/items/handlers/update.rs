//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sillage_app::domain::carts::{
    data::{CartItemUpdate, UpdatedCartItem},
    records::CartItemUuid,
};

use crate::{
    carts::{errors::into_api_error, models::CartItemResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; `0` removes the line
    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub gift_wrap: Option<bool>,

    #[serde(default)]
    pub sample_included: Option<bool>,
}

impl From<UpdateCartItemRequest> for CartItemUpdate {
    fn from(request: UpdateCartItemRequest) -> Self {
        CartItemUpdate {
            quantity: request.quantity,
            gift_wrap: request.gift_wrap,
            sample_included: request.sample_included,
        }
    }
}

/// Update Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemResponse {
    /// The line was deleted because its quantity reached zero
    pub removed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<CartItemResponse>,
}

impl From<UpdatedCartItem> for UpdateCartItemResponse {
    fn from(updated: UpdatedCartItem) -> Self {
        match updated {
            UpdatedCartItem::Updated(item) => Self {
                removed: false,
                item: Some(item.into()),
            },
            UpdatedCartItem::Removed => Self {
                removed: true,
                item: None,
            },
        }
    }
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = []), ("session_id" = []))
)]
#[tracing::instrument(
    name = "cart.items.update",
    skip(item, json, depot),
    fields(cart_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateCartItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let item = item.into_inner();

    tracing::Span::current().record("cart_item_uuid", tracing::field::display(item));

    let updated = state
        .app
        .carts
        .update_item(
            identity,
            CartItemUuid::from_uuid(item),
            json.into_inner().into(),
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use sillage_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        catalog::records::ProductUuid,
    };

    use crate::{
        errors::{ErrorCode, ErrorResponse},
        test_helpers::{carts_service_as_user, make_cart_item},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service_as_user(
            carts,
            Router::with_path("cart/items/{item}").put(handler),
        )
    }

    #[tokio::test]
    async fn quantity_change_returns_item() -> TestResult {
        let item = make_cart_item(ProductUuid::new(), 4);
        let item_uuid = item.uuid;

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |_, uuid, update| {
                *uuid == item_uuid
                    && *update
                        == CartItemUpdate {
                            quantity: Some(4),
                            ..CartItemUpdate::default()
                        }
            })
            .return_once(move |_, _, _| Ok(UpdatedCartItem::Updated(item)));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{item_uuid}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(carts))
            .await;

        let body: UpdateCartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.removed);
        assert_eq!(body.item.map(|item| item.quantity), Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_reports_removed() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Ok(UpdatedCartItem::Removed));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        let body: UpdateCartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.removed);
        assert!(body.item.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn foreign_item_is_forbidden() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::AccessDenied));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
            .json(&json!({ "gift_wrap": true }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.error_code, ErrorCode::AccessDenied);

        Ok(())
    }
}
