//! Database connection management

use std::time::Duration;

use sillage::prelude::Price;
use sqlx::{
    PgPool, Postgres, Row, Transaction,
    postgres::{PgPoolOptions, PgRow},
};

/// Pool sizing and timeouts.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Shared handle to the connection pool, injected into every service.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL` with default pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with(database_url, PoolSettings::default()).await
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(
    database_url: &str,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<Price, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64)
        .map(Price::new)
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

pub(crate) fn try_get_optional_amount(
    row: &PgRow,
    col: &str,
) -> Result<Option<Price>, sqlx::Error> {
    let amount_i64: Option<i64> = row.try_get(col)?;

    amount_i64
        .map(|amount| {
            u64::try_from(amount)
                .map(Price::new)
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: col.to_string(),
                    source: Box::new(e),
                })
        })
        .transpose()
}

pub(crate) fn try_get_u32(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i32 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let count: i64 = row.try_get(col)?;

    u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn to_db_amount(amount: Price, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount.minor_units()).map_err(|e| sqlx::Error::Encode(Box::new(EncodeError {
        column: col.to_string(),
        source: e,
    })))
}

pub(crate) fn to_db_count(count: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(count).map_err(|e| sqlx::Error::Encode(Box::new(EncodeError {
        column: col.to_string(),
        source: e,
    })))
}

pub(crate) fn to_db_u32(value: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(EncodeError {
        column: col.to_string(),
        source: e,
    })))
}

#[derive(Debug, thiserror::Error)]
#[error("value for {column} is out of range")]
pub(crate) struct EncodeError {
    column: String,
    #[source]
    source: std::num::TryFromIntError,
}
