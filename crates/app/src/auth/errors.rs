//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The bearer value is not shaped like a Sillage token.
    #[error("bearer token is malformed")]
    Malformed,

    /// No active token has this hash; it was never issued or was revoked.
    #[error("bearer token is unknown or revoked")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for AuthServiceError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Sql(other),
        }
    }
}
