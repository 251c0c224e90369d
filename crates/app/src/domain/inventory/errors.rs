//! Ledger errors.

use thiserror::Error;

use crate::domain::catalog::records::ProductUuid;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Not enough unreserved stock for the requested quantity.
    #[error("insufficient stock for {product}/{size_ml}ml: requested {requested}")]
    InsufficientStock {
        product: ProductUuid,
        size_ml: u32,
        requested: u32,
    },

    /// The product size does not exist.
    #[error("product size {product}/{size_ml}ml not found")]
    NotFound { product: ProductUuid, size_ml: u32 },

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
