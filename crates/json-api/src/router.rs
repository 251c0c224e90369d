//! App Router

use salvo::Router;

use crate::{carts, identity, orders, products};

pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("products/{product}/sizes").get(products::sizes::handler))
        .push(
            Router::new()
                .hoop(identity::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .push(Router::with_path("clear").delete(carts::clear::handler))
                        .push(Router::with_path("merge").post(carts::merge::handler))
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("cancel").post(orders::cancel::handler)),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        catcher::Catcher,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use sillage_app::{
        auth::AuthServiceError,
        domain::{carts::views::CartView, catalog::records::ProductUuid},
    };
    use testresult::TestResult;

    use crate::{
        errors::{ErrorCode, ErrorResponse, envelope},
        identity::middleware::SESSION_ID_HEADER,
        test_helpers::{Mocks, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(Router::new().hoop(inject(mocks.into_state())).push(app_router()))
            .catcher(Catcher::default().hoop(envelope))
    }

    #[tokio::test]
    async fn cart_requires_a_shopper() -> TestResult {
        let mut mocks = Mocks::new();
        mocks.carts.expect_get_cart().never();

        let mut res = TestClient::get("http://example.com/api/cart")
            .send(&make_service(mocks))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error_code, ErrorCode::AuthenticationRequired);

        Ok(())
    }

    #[tokio::test]
    async fn guest_session_reaches_the_cart() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(CartView::default()));

        let res = TestClient::get("http://example.com/api/cart")
            .add_header(SESSION_ID_HEADER, "guest-abc", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn bearer_token_reaches_orders() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "sl_good")
            .return_once(|_| Ok(TEST_USER_UUID));

        mocks
            .orders
            .expect_list_orders()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/api/orders")
            .add_header(AUTHORIZATION, "Bearer sl_good", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        mocks.orders.expect_list_orders().never();

        let mut res = TestClient::get("http://example.com/api/orders")
            .add_header(AUTHORIZATION, "Bearer sl_revoked", true)
            .send(&make_service(mocks))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error_code, ErrorCode::InvalidToken);

        Ok(())
    }

    #[tokio::test]
    async fn product_sizes_are_public() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .catalog
            .expect_list_product_sizes()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get(format!("http://example.com/api/products/{product}/sizes"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_uses_error_envelope() -> TestResult {
        let mut res = TestClient::get("http://example.com/api/wishlist")
            .send(&make_service(Mocks::new()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error_code, ErrorCode::NotFound);

        Ok(())
    }
}
