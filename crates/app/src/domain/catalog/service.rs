//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use sillage::prelude::Price;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewProduct, NewProductSize},
        errors::CatalogServiceError,
        records::{ProductRecord, ProductSizeRecord, ProductUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn get_product_size(
        &self,
        product: ProductUuid,
        size_ml: u32,
    ) -> Result<ProductSizeRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let size = self
            .repository
            .find_product_size(&mut tx, product, size_ml)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(size)
    }

    async fn list_product_sizes(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductSizeRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        // Distinguish an unknown product from one with no active sizes.
        self.repository.get_product(&mut tx, product).await?;

        let sizes = self.repository.list_product_sizes(&mut tx, product).await?;

        tx.commit().await?;

        Ok(sizes)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_product_size(
        &self,
        size: NewProductSize,
    ) -> Result<ProductSizeRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product_size(&mut tx, &size).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn import_product(
        &self,
        product: NewProduct,
        sizes: Vec<NewProductSize>,
    ) -> Result<(ProductRecord, Vec<ProductSizeRecord>), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.upsert_product(&mut tx, &product).await?;

        let mut imported = Vec::with_capacity(sizes.len());

        for size in &sizes {
            if size.product_uuid != record.uuid {
                return Err(CatalogServiceError::InvalidReference);
            }

            imported.push(self.repository.upsert_product_size(&mut tx, size).await?);
        }

        tx.commit().await?;

        info!(
            product_uuid = %record.uuid,
            sizes = imported.len(),
            "imported product"
        );

        Ok((record, imported))
    }

    async fn set_stock(
        &self,
        product: ProductUuid,
        size_ml: u32,
        stock_quantity: u64,
    ) -> Result<ProductSizeRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_stock(&mut tx, product, size_ml, stock_quantity)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_size_active(
        &self,
        product: ProductUuid,
        size_ml: u32,
        is_active: bool,
    ) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .set_size_active(&mut tx, product, size_ml, is_active)
            .await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn reprice_size(
        &self,
        product: ProductUuid,
        size_ml: u32,
        price: Price,
        sale_price: Option<Price>,
    ) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .set_price(&mut tx, product, size_ml, price, sale_price)
            .await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a single product size, active or not.
    async fn get_product_size(
        &self,
        product: ProductUuid,
        size_ml: u32,
    ) -> Result<ProductSizeRecord, CatalogServiceError>;

    /// Active sizes of a product, smallest first.
    async fn list_product_sizes(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductSizeRecord>, CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a new size for an existing product.
    async fn create_product_size(
        &self,
        size: NewProductSize,
    ) -> Result<ProductSizeRecord, CatalogServiceError>;

    /// Insert or update a product and its sizes in one transaction.
    async fn import_product(
        &self,
        product: NewProduct,
        sizes: Vec<NewProductSize>,
    ) -> Result<(ProductRecord, Vec<ProductSizeRecord>), CatalogServiceError>;

    /// Replace the on-hand stock of a size. Fails with `InvalidData` when the
    /// new stock is below what is already reserved.
    async fn set_stock(
        &self,
        product: ProductUuid,
        size_ml: u32,
        stock_quantity: u64,
    ) -> Result<ProductSizeRecord, CatalogServiceError>;

    /// Enable or withdraw a size from sale.
    async fn set_size_active(
        &self,
        product: ProductUuid,
        size_ml: u32,
        is_active: bool,
    ) -> Result<(), CatalogServiceError>;

    /// Change the list and sale price of a size.
    async fn reprice_size(
        &self,
        product: ProductUuid,
        size_ml: u32,
        price: Price,
        sale_price: Option<Price>,
    ) -> Result<(), CatalogServiceError>;
}
