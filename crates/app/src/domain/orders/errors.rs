//! Orders service errors.

use sillage::prelude::{DiscountError, Price, PriceError, TotalsError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    catalog::records::ProductUuid, inventory::LedgerError, orders::data::OrderValidationError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("checkout requires a signed-in user")]
    AuthenticationRequired,

    #[error(transparent)]
    Validation(#[from] OrderValidationError),

    #[error(transparent)]
    Totals(#[from] TotalsError),

    #[error("cart is empty")]
    CartEmpty,

    #[error("product size is not available")]
    ProductSizeNotAvailable,

    #[error("product size is out of stock")]
    ProductOutOfStock,

    #[error("price changed from {expected} to {current}")]
    PriceChanged { expected: Price, current: Price },

    #[error("not enough stock for {product} ({size_ml} ml), {requested} requested")]
    InsufficientStock {
        product: ProductUuid,
        size_ml: u32,
        requested: u32,
    },

    #[error("promotion code is not valid")]
    InvalidPromotion,

    #[error("promotion requires a subtotal of at least {minimum}")]
    PromotionNotApplicable { minimum: Price },

    #[error("gift card is not valid")]
    InvalidGiftCard,

    #[error("order belongs to another user")]
    AccessDenied,

    #[error("order can no longer be cancelled")]
    NotCancellable,

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid order amount")]
    Price(#[from] PriceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<LedgerError> for OrdersServiceError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::InsufficientStock {
                product,
                size_ml,
                requested,
            } => Self::InsufficientStock {
                product,
                size_ml,
                requested,
            },
            LedgerError::NotFound { .. } => Self::ProductSizeNotAvailable,
            LedgerError::Sql(error) => error.into(),
        }
    }
}

impl From<DiscountError> for OrdersServiceError {
    fn from(error: DiscountError) -> Self {
        match error {
            DiscountError::MinimumNotMet { minimum, .. } => {
                Self::PromotionNotApplicable { minimum }
            }
            DiscountError::PercentOutOfRange(_) | DiscountError::PercentConversion => {
                Self::InvalidPromotion
            }
        }
    }
}
