//! Carts service errors.

use sillage::prelude::{Price, PriceError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("product size is not available")]
    ProductSizeNotAvailable,

    #[error("product size is out of stock")]
    ProductOutOfStock,

    #[error("price changed from {expected} to {current}")]
    PriceChanged { expected: Price, current: Price },

    #[error("only {available} available, {requested} requested")]
    InsufficientStock { available: u64, requested: u64 },

    #[error("cart item not found")]
    ItemNotFound,

    #[error("cart belongs to another shopper")]
    AccessDenied,

    #[error("cart not found")]
    NotFound,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid cart amount")]
    Price(#[from] PriceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
