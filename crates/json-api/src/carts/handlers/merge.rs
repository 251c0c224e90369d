//! Merge Guest Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sillage_app::domain::identity::SessionId;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Merge Guest Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MergeCartRequest {
    /// Guest session whose cart moves into the signed-in user's cart
    pub session_id: String,
}

/// Merge Guest Cart Handler
///
/// Moves a guest session's lines into the signed-in user's cart, adding
/// quantities where both carts hold the same size.
#[endpoint(
    tags("cart"),
    summary = "Merge Guest Cart",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "cart.merge",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<MergeCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let session = SessionId::parse(json.into_inner().session_id)
        .map_err(|source| ApiError::validation(format!("invalid session_id: {source}")))?;

    let cart = state
        .app
        .carts
        .merge_guest_cart(user, &session)
        .await
        .map_err(into_api_error)?;

    tracing::info!(user_uuid = %user, items = cart.items.len(), "merged guest cart");

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use sillage_app::domain::carts::{CartsServiceError, MockCartsService, views::CartView};
    use testresult::TestResult;

    use crate::{
        errors::{ErrorCode, ErrorResponse},
        test_helpers::{TEST_USER_UUID, carts_service_as_guest, carts_service_as_user},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/merge").post(handler)
    }

    #[tokio::test]
    async fn merge_moves_guest_lines() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_merge_guest_cart()
            .once()
            .withf(|user, session| *user == TEST_USER_UUID && session.as_str() == "guest-42")
            .return_once(|_, _| Ok(CartView::default()));

        let res = TestClient::post("http://example.com/cart/merge")
            .json(&json!({ "session_id": "guest-42" }))
            .send(&carts_service_as_user(carts, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn guests_cannot_merge() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_merge_guest_cart().never();

        let mut res = TestClient::post("http://example.com/cart/merge")
            .json(&json!({ "session_id": "guest-42" }))
            .send(&carts_service_as_guest(carts, route()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error_code, ErrorCode::AuthenticationRequired);

        Ok(())
    }

    #[tokio::test]
    async fn merge_over_stock_is_insufficient_stock() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_merge_guest_cart().once().return_once(|_, _| {
            Err(CartsServiceError::InsufficientStock {
                available: 2,
                requested: 5,
            })
        });

        let mut res = TestClient::post("http://example.com/cart/merge")
            .json(&json!({ "session_id": "guest-42" }))
            .send(&carts_service_as_user(carts, route()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error_code, ErrorCode::InsufficientStock);

        Ok(())
    }

    #[tokio::test]
    async fn blank_session_id_is_validation_error() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_merge_guest_cart().never();

        let mut res = TestClient::post("http://example.com/cart/merge")
            .json(&json!({ "session_id": "" }))
            .send(&carts_service_as_user(carts, route()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error_code, ErrorCode::ValidationError);

        Ok(())
    }
}
