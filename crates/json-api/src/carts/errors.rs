//! Errors

use tracing::error;

use sillage_app::domain::carts::CartsServiceError;

use crate::errors::{ApiError, ErrorCode};

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::InvalidQuantity => {
            ApiError::validation("Quantity must be at least 1")
        }
        CartsServiceError::InvalidData | CartsServiceError::Price(_) => {
            ApiError::validation("Invalid cart payload")
        }
        CartsServiceError::ProductSizeNotAvailable | CartsServiceError::InvalidReference => {
            ApiError::new(
                ErrorCode::ProductSizeNotAvailable,
                "This size is not available",
            )
        }
        CartsServiceError::ProductOutOfStock => {
            ApiError::new(ErrorCode::ProductOutOfStock, "This size is out of stock")
        }
        CartsServiceError::PriceChanged { expected, current } => ApiError::new(
            ErrorCode::PriceChanged,
            format!("Price changed from {expected} to {current}"),
        ),
        CartsServiceError::InsufficientStock {
            available,
            requested,
        } => ApiError::new(
            ErrorCode::InsufficientStock,
            format!("Only {available} available, {requested} requested"),
        ),
        CartsServiceError::ItemNotFound => {
            ApiError::new(ErrorCode::CartItemNotFound, "Cart item not found")
        }
        CartsServiceError::AccessDenied => {
            ApiError::new(ErrorCode::AccessDenied, "Cart belongs to another shopper")
        }
        CartsServiceError::NotFound => ApiError::new(ErrorCode::NotFound, "Cart not found"),
        CartsServiceError::AlreadyExists => {
            ApiError::new(ErrorCode::Conflict, "Cart was changed concurrently")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use sillage::prelude::Price;

    use super::*;

    #[test]
    fn business_rule_failures_keep_their_codes() {
        let cases = [
            (CartsServiceError::InvalidQuantity, ErrorCode::ValidationError),
            (
                CartsServiceError::ProductSizeNotAvailable,
                ErrorCode::ProductSizeNotAvailable,
            ),
            (CartsServiceError::ProductOutOfStock, ErrorCode::ProductOutOfStock),
            (
                CartsServiceError::InsufficientStock {
                    available: 1,
                    requested: 3,
                },
                ErrorCode::InsufficientStock,
            ),
            (
                CartsServiceError::PriceChanged {
                    expected: Price::new(16_500),
                    current: Price::new(17_000),
                },
                ErrorCode::PriceChanged,
            ),
            (CartsServiceError::ItemNotFound, ErrorCode::CartItemNotFound),
            (CartsServiceError::AccessDenied, ErrorCode::AccessDenied),
            (
                CartsServiceError::Sql(sqlx::Error::PoolTimedOut),
                ErrorCode::InternalServerError,
            ),
        ];

        for (error, code) in cases {
            assert_eq!(into_api_error(error).code(), code);
        }
    }
}
