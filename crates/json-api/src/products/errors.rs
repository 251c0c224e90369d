//! Errors

use tracing::error;

use sillage_app::domain::catalog::CatalogServiceError;

use crate::errors::{ApiError, ErrorCode};

pub(crate) fn into_api_error(error: CatalogServiceError) -> ApiError {
    match error {
        CatalogServiceError::NotFound | CatalogServiceError::InvalidReference => {
            ApiError::new(ErrorCode::ProductNotFound, "Product not found")
        }
        CatalogServiceError::AlreadyExists => {
            ApiError::new(ErrorCode::Conflict, "Product already exists")
        }
        CatalogServiceError::MissingRequiredData | CatalogServiceError::InvalidData => {
            ApiError::validation("Invalid product data")
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            ApiError::internal()
        }
    }
}
