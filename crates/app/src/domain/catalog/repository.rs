//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sillage::prelude::Price;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{
        to_db_amount, to_db_count, to_db_u32, try_get_amount, try_get_count,
        try_get_optional_amount, try_get_u32,
    },
    domain::catalog::{
        data::{NewProduct, NewProductSize},
        records::{AvailabilityStatus, ProductRecord, ProductSizeRecord, ProductUuid},
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPSERT_PRODUCT_SQL: &str = include_str!("sql/upsert_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_SIZE_SQL: &str = include_str!("sql/get_product_size.sql");
const LIST_PRODUCT_SIZES_SQL: &str = include_str!("sql/list_product_sizes.sql");
const CREATE_PRODUCT_SIZE_SQL: &str = include_str!("sql/create_product_size.sql");
const UPSERT_PRODUCT_SIZE_SQL: &str = include_str!("sql/upsert_product_size.sql");
const SET_STOCK_SQL: &str = include_str!("sql/set_stock.sql");
const SET_SIZE_ACTIVE_SQL: &str = include_str!("sql/set_size_active.sql");
const SET_PRICE_SQL: &str = include_str!("sql/set_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.brand_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPSERT_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.brand_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_product_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
    ) -> Result<Option<ProductSizeRecord>, sqlx::Error> {
        query_as::<Postgres, ProductSizeRecord>(GET_PRODUCT_SIZE_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_sizes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductSizeRecord>, sqlx::Error> {
        query_as::<Postgres, ProductSizeRecord>(LIST_PRODUCT_SIZES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        size: &NewProductSize,
    ) -> Result<ProductSizeRecord, sqlx::Error> {
        bind_new_size(query_as::<Postgres, ProductSizeRecord>(CREATE_PRODUCT_SIZE_SQL), size)?
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_product_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        size: &NewProductSize,
    ) -> Result<ProductSizeRecord, sqlx::Error> {
        bind_new_size(query_as::<Postgres, ProductSizeRecord>(UPSERT_PRODUCT_SIZE_SQL), size)?
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
        stock_quantity: u64,
    ) -> Result<ProductSizeRecord, sqlx::Error> {
        query_as::<Postgres, ProductSizeRecord>(SET_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .bind(to_db_count(stock_quantity, "stock_quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_size_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
        is_active: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_SIZE_ACTIVE_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .bind(is_active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        size_ml: u32,
        price: Price,
        sale_price: Option<Price>,
    ) -> Result<u64, sqlx::Error> {
        let sale_price = sale_price
            .map(|amount| to_db_amount(amount, "sale_price"))
            .transpose()?;

        let rows_affected = query(SET_PRICE_SQL)
            .bind(product.into_uuid())
            .bind(to_db_u32(size_ml, "size_ml")?)
            .bind(to_db_amount(price, "price")?)
            .bind(sale_price)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

type SizeQuery<'q> =
    sqlx::query::QueryAs<'q, Postgres, ProductSizeRecord, sqlx::postgres::PgArguments>;

fn bind_new_size<'q>(
    query: SizeQuery<'q>,
    size: &'q NewProductSize,
) -> Result<SizeQuery<'q>, sqlx::Error> {
    let sale_price = size
        .sale_price
        .map(|amount| to_db_amount(amount, "sale_price"))
        .transpose()?;

    Ok(query
        .bind(size.product_uuid.into_uuid())
        .bind(to_db_u32(size.size_ml, "size_ml")?)
        .bind(&size.sku)
        .bind(to_db_amount(size.price, "price")?)
        .bind(sale_price)
        .bind(to_db_count(size.stock_quantity, "stock_quantity")?)
        .bind(size.availability_status.as_str()))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            brand_name: row.try_get("brand_name")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSizeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let availability_status = row
            .try_get::<String, _>("availability_status")?
            .parse::<AvailabilityStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "availability_status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            brand_name: row.try_get("brand_name")?,
            size_ml: try_get_u32(row, "size_ml")?,
            sku: row.try_get("sku")?,
            price: try_get_amount(row, "price")?,
            sale_price: try_get_optional_amount(row, "sale_price")?,
            stock_quantity: try_get_count(row, "stock_quantity")?,
            reserved_quantity: try_get_count(row, "reserved_quantity")?,
            availability_status,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
