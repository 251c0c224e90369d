//! Ledger Repository

use sqlx::{FromRow, Postgres, Transaction, postgres::PgRow, query_as};
use tracing::debug;

use crate::{
    database::{to_db_u32, try_get_count},
    domain::{catalog::records::ProductUuid, inventory::errors::LedgerError},
};

const RESERVE_SQL: &str = include_str!("sql/reserve.sql");
const RELEASE_SQL: &str = include_str!("sql/release.sql");
const AVAILABLE_SQL: &str = include_str!("sql/available.sql");

/// Stock counters of a size after a ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StockLevel {
    pub stock_quantity: u64,
    pub reserved_quantity: u64,
}

impl StockLevel {
    pub(crate) const fn available(self) -> u64 {
        self.stock_quantity.saturating_sub(self.reserved_quantity)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryLedger;

impl PgInventoryLedger {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Earmark `quantity` units with a single conditional update, so two
    /// transactions can never both claim the last units.
    pub(crate) async fn reserve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
        quantity: u32,
    ) -> Result<StockLevel, LedgerError> {
        let level = query_as::<Postgres, StockLevel>(RESERVE_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .bind(i64::from(quantity))
            .fetch_optional(&mut **tx)
            .await?;

        let Some(level) = level else {
            // Zero rows means either no such size or not enough stock.
            self.available(tx, product, size_ml).await?;

            return Err(LedgerError::InsufficientStock {
                product,
                size_ml,
                requested: quantity,
            });
        };

        debug!(
            product_uuid = %product,
            size_ml,
            quantity,
            reserved = level.reserved_quantity,
            "reserved stock"
        );

        Ok(level)
    }

    /// Return `quantity` units to sale. The counter never drops below zero.
    pub(crate) async fn release(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
        quantity: u32,
    ) -> Result<StockLevel, LedgerError> {
        let level = query_as::<Postgres, StockLevel>(RELEASE_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .bind(i64::from(quantity))
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(LedgerError::NotFound { product, size_ml })?;

        debug!(
            product_uuid = %product,
            size_ml,
            quantity,
            reserved = level.reserved_quantity,
            "released stock"
        );

        Ok(level)
    }

    /// Units of a size not yet reserved.
    pub(crate) async fn available(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
    ) -> Result<u64, LedgerError> {
        query_as::<Postgres, StockLevel>(AVAILABLE_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .fetch_optional(&mut **tx)
            .await?
            .map(StockLevel::available)
            .ok_or(LedgerError::NotFound { product, size_ml })
    }
}

impl<'r> FromRow<'r, PgRow> for StockLevel {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            stock_quantity: try_get_count(row, "stock_quantity")?,
            reserved_quantity: try_get_count(row, "reserved_quantity")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::CatalogService,
        test::{TestContext, helpers::new_size},
    };

    use super::*;

    #[tokio::test]
    async fn reserve_increments_reserved_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Oud Noir", "Maison Verre").await?;
        ctx.catalog
            .create_product_size(new_size(product, 50, 16_500, 10))
            .await?;

        let ledger = PgInventoryLedger::new();
        let mut tx = ctx.db.begin_test_transaction().await;

        let level = ledger.reserve(&mut tx, product, 50, 3).await?;

        assert_eq!(level.reserved_quantity, 3);
        assert_eq!(ledger.available(&mut tx, product, 50).await?, 7);

        Ok(())
    }

    #[tokio::test]
    async fn reserve_exactly_available_succeeds_then_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Oud Noir", "Maison Verre").await?;
        ctx.catalog
            .create_product_size(new_size(product, 50, 16_500, 2))
            .await?;

        let ledger = PgInventoryLedger::new();
        let mut tx = ctx.db.begin_test_transaction().await;

        ledger.reserve(&mut tx, product, 50, 2).await?;

        let result = ledger.reserve(&mut tx, product, 50, 1).await;

        assert!(
            matches!(
                result,
                Err(LedgerError::InsufficientStock { requested: 1, size_ml: 50, .. })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reserve_unknown_size_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Oud Noir", "Maison Verre").await?;

        let ledger = PgInventoryLedger::new();
        let mut tx = ctx.db.begin_test_transaction().await;

        let result = ledger.reserve(&mut tx, product, 50, 1).await;

        assert!(
            matches!(result, Err(LedgerError::NotFound { size_ml: 50, .. })),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn release_never_goes_below_zero() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Oud Noir", "Maison Verre").await?;
        ctx.catalog
            .create_product_size(new_size(product, 50, 16_500, 5))
            .await?;

        let ledger = PgInventoryLedger::new();
        let mut tx = ctx.db.begin_test_transaction().await;

        ledger.reserve(&mut tx, product, 50, 2).await?;

        let level = ledger.release(&mut tx, product, 50, 5).await?;

        assert_eq!(level.reserved_quantity, 0);
        assert_eq!(level.available(), 5);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_reservations_never_oversell() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Oud Noir", "Maison Verre").await?;
        ctx.catalog
            .create_product_size(new_size(product, 50, 16_500, 5))
            .await?;

        let mut handles = Vec::new();

        for _ in 0..8 {
            let pool = ctx.db.pool().clone();

            handles.push(tokio::spawn(async move {
                let ledger = PgInventoryLedger::new();
                let mut tx = pool.begin().await?;

                match ledger.reserve(&mut tx, product, 50, 1).await {
                    Ok(_) => {
                        tx.commit().await?;
                        Ok::<bool, LedgerError>(true)
                    }
                    Err(LedgerError::InsufficientStock { .. }) => Ok(false),
                    Err(error) => Err(error),
                }
            }));
        }

        let mut successes = 0;

        for handle in handles {
            if handle.await?? {
                successes += 1;
            }
        }

        let size = ctx.catalog.get_product_size(product, 50).await?;

        assert_eq!(successes, 5);
        assert_eq!(size.reserved_quantity, 5);
        assert_eq!(size.available_quantity(), 0);

        Ok(())
    }
}
