//! API error envelope.
//!
//! Every failure leaves the server as
//! `{ "success": false, "message", "timestamp", "error_code" }` with the
//! status code implied by its error code.

use jiff::Timestamp;
use salvo::{
    http::{ResBody, StatusCode},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Span;

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ErrorCode {
    ValidationError,
    ProductSizeNotAvailable,
    ProductOutOfStock,
    InsufficientStock,
    CartEmpty,
    InvalidPromotion,
    PromotionNotApplicable,
    InvalidGiftCard,
    AuthenticationRequired,
    InvalidToken,
    AccessDenied,
    CartItemNotFound,
    OrderNotFound,
    ProductNotFound,
    NotFound,
    PriceChanged,
    OrderNotCancellable,
    Conflict,
    InternalServerError,
}

impl ErrorCode {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ProductSizeNotAvailable => "PRODUCT_SIZE_NOT_AVAILABLE",
            Self::ProductOutOfStock => "PRODUCT_OUT_OF_STOCK",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::CartEmpty => "CART_EMPTY",
            Self::InvalidPromotion => "INVALID_PROMOTION",
            Self::PromotionNotApplicable => "PROMOTION_NOT_APPLICABLE",
            Self::InvalidGiftCard => "INVALID_GIFT_CARD",
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::PriceChanged => "PRICE_CHANGED",
            Self::OrderNotCancellable => "ORDER_NOT_CANCELLABLE",
            Self::Conflict => "CONFLICT",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub(crate) const fn status(self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::ProductSizeNotAvailable
            | Self::ProductOutOfStock
            | Self::InsufficientStock
            | Self::CartEmpty
            | Self::InvalidPromotion
            | Self::PromotionNotApplicable
            | Self::InvalidGiftCard => StatusCode::BAD_REQUEST,
            Self::AuthenticationRequired | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::CartItemNotFound | Self::OrderNotFound | Self::ProductNotFound | Self::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::PriceChanged | Self::OrderNotCancellable | Self::Conflict => StatusCode::CONFLICT,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Best-fitting code for a bare status produced outside a handler.
    fn for_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::AuthenticationRequired,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            409 => Self::Conflict,
            400..=499 => Self::ValidationError,
            _ => Self::InternalServerError,
        }
    }
}

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable description
    pub message: String,

    /// When the error was produced
    pub timestamp: String,

    /// Machine-readable error code
    pub error_code: ErrorCode,
}

/// A failed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} {message}", .code.as_str())]
pub(crate) struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.status(),
            code,
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(ErrorCode::InternalServerError, "Internal server error")
    }

    pub(crate) fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    #[cfg(test)]
    pub(crate) const fn code(&self) -> ErrorCode {
        self.code
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        Span::current().record("error_code", self.code.as_str());

        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            success: false,
            message: self.message,
            timestamp: Timestamp::now().to_string(),
            error_code: self.code,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = ErrorResponse::to_schema(components);

        for (status, description) in [
            ("400", "Validation or business rule failure"),
            ("401", "Missing or invalid credentials"),
            ("403", "Resource belongs to another shopper"),
            ("404", "Resource not found"),
            ("409", "Conflicting state"),
            ("500", "Internal server error"),
        ] {
            operation.responses.insert(
                status,
                oapi::Response::new(description)
                    .add_content("application/json", oapi::Content::new(schema.clone())),
            );
        }
    }
}

/// Rewrite errors raised outside handlers (unknown routes, malformed bodies,
/// panics) into the same envelope.
#[handler]
pub(crate) async fn envelope(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    let message = match &res.body {
        ResBody::Error(error) => error.brief.clone(),
        _ => status.canonical_reason().unwrap_or("Error").to_string(),
    };

    let code = ErrorCode::for_status(status);

    ApiError {
        status,
        code,
        message,
    }
    .render(res);

    ctrl.skip_rest();
}
