//! Errors

use tracing::error;

use sillage_app::domain::orders::OrdersServiceError;

use crate::errors::{ApiError, ErrorCode};

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::AuthenticationRequired => ApiError::new(
            ErrorCode::AuthenticationRequired,
            "Sign in to place an order",
        ),
        OrdersServiceError::Validation(source) => ApiError::validation(source.to_string()),
        OrdersServiceError::Totals(source) => ApiError::validation(source.to_string()),
        OrdersServiceError::InvalidData | OrdersServiceError::Price(_) => {
            ApiError::validation("Invalid order payload")
        }
        OrdersServiceError::CartEmpty => ApiError::new(ErrorCode::CartEmpty, "Cart is empty"),
        OrdersServiceError::ProductSizeNotAvailable | OrdersServiceError::InvalidReference => {
            ApiError::new(
                ErrorCode::ProductSizeNotAvailable,
                "A size in the cart is no longer available",
            )
        }
        OrdersServiceError::ProductOutOfStock => ApiError::new(
            ErrorCode::ProductOutOfStock,
            "A size in the cart is out of stock",
        ),
        OrdersServiceError::PriceChanged { expected, current } => ApiError::new(
            ErrorCode::PriceChanged,
            format!("Price changed from {expected} to {current}"),
        ),
        OrdersServiceError::InsufficientStock {
            size_ml, requested, ..
        } => ApiError::new(
            ErrorCode::InsufficientStock,
            format!("Not enough stock for {requested} x {size_ml} ml"),
        ),
        OrdersServiceError::InvalidPromotion => {
            ApiError::new(ErrorCode::InvalidPromotion, "Promotion code is not valid")
        }
        OrdersServiceError::PromotionNotApplicable { minimum } => ApiError::new(
            ErrorCode::PromotionNotApplicable,
            format!("Promotion requires a subtotal of at least {minimum}"),
        ),
        OrdersServiceError::InvalidGiftCard => {
            ApiError::new(ErrorCode::InvalidGiftCard, "Gift card is not valid")
        }
        OrdersServiceError::AccessDenied => {
            ApiError::new(ErrorCode::AccessDenied, "Order belongs to another user")
        }
        OrdersServiceError::NotCancellable => ApiError::new(
            ErrorCode::OrderNotCancellable,
            "Order can no longer be cancelled",
        ),
        OrdersServiceError::NotFound => {
            ApiError::new(ErrorCode::OrderNotFound, "Order not found")
        }
        OrdersServiceError::AlreadyExists => {
            ApiError::new(ErrorCode::Conflict, "Order number already in use, retry")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            ApiError::internal()
        }
    }
}
