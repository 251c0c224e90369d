//! List Product Sizes Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use sillage_app::domain::catalog::records::ProductUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, models::ProductSizeResponse},
    state::State,
};

/// List Product Sizes Handler
///
/// Active sizes of a product with the price a shopper would pay and the
/// quantity still available.
#[endpoint(tags("products"), summary = "List Product Sizes")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductSizeResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sizes = state
        .app
        .catalog
        .list_product_sizes(ProductUuid::from_uuid(product.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(sizes.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use sillage::prelude::Price;
    use testresult::TestResult;

    use sillage_app::domain::catalog::{CatalogServiceError, MockCatalogService};

    use crate::{
        errors::{ErrorCode, ErrorResponse},
        test_helpers::{catalog_service, make_size},
    };

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(
            catalog,
            Router::with_path("products/{product}/sizes").get(handler),
        )
    }

    #[tokio::test]
    async fn sizes_carry_effective_price_and_availability() -> TestResult {
        let product = ProductUuid::new();

        let mut on_sale = make_size(product, 100);
        on_sale.sale_price = Some(Price::new(14_000));

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_product_sizes()
            .once()
            .withf(move |uuid| *uuid == product)
            .return_once(move |_| Ok(vec![make_size(product, 50), on_sale]));

        let mut res = TestClient::get(format!("http://example.com/products/{product}/sizes"))
            .send(&make_service(catalog))
            .await;

        let body: Vec<ProductSizeResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2);

        assert_eq!(body[0].effective_price, 16_500);
        assert_eq!(body[0].available_quantity, 8);
        assert_eq!(body[0].availability_status, "in_stock");

        assert_eq!(body[1].price, 16_500);
        assert_eq!(body[1].effective_price, 14_000);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_product_sizes()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let mut res = TestClient::get(format!("http://example.com/products/{}/sizes", Uuid::now_v7()))
            .send(&make_service(catalog))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error_code, ErrorCode::ProductNotFound);

        Ok(())
    }
}
