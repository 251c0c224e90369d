//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sillage::prelude::Price;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_db_amount, to_db_u32, try_get_amount, try_get_count, try_get_u32},
    domain::{
        carts::records::{
            CartItemRecord, CartItemUuid, CartLineRecord, CartUuid, OwnedCartItemRecord,
        },
        catalog::records::{AvailabilityStatus, ProductUuid},
    },
};

use super::carts::try_get_owner;

const LIST_CART_LINES_SQL: &str = include_str!("../sql/list_cart_lines.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const LOCK_CART_ITEM_SQL: &str = include_str!("../sql/lock_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");

/// Line to insert, or to add onto an existing line for the same size.
#[derive(Debug, Clone)]
pub(crate) struct CartItemUpsert {
    pub product_uuid: ProductUuid,
    pub size_ml: u32,
    pub quantity: u32,
    pub unit_price: Price,
    pub gift_wrap: bool,
    pub sample_included: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LIST_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line, or add to the quantity of the cart's existing line for
    /// the same product size. Never produces two rows for one size.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &CartItemUpsert,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(to_db_u32(item.size_ml, "size_ml")?)
            .bind(to_db_u32(item.quantity, "quantity")?)
            .bind(to_db_amount(item.unit_price, "unit_price")?)
            .bind(item.gift_wrap)
            .bind(item.sample_included)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<Option<OwnedCartItemRecord>, sqlx::Error> {
        query_as::<Postgres, OwnedCartItemRecord>(LOCK_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        quantity: u32,
        gift_wrap: bool,
        sample_included: bool,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(to_db_u32(quantity, "quantity")?)
            .bind(gift_wrap)
            .bind(sample_included)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            size_ml: try_get_u32(row, "size_ml")?,
            quantity: try_get_u32(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            gift_wrap: row.try_get("gift_wrap")?,
            sample_included: row.try_get("sample_included")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OwnedCartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            item: CartItemRecord::from_row(row)?,
            owner: try_get_owner(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let availability_status = row
            .try_get::<String, _>("availability_status")?
            .parse::<AvailabilityStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "availability_status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            item: CartItemRecord::from_row(row)?,
            product_name: row.try_get("product_name")?,
            brand_name: row.try_get("brand_name")?,
            sku: row.try_get("sku")?,
            current_price: try_get_amount(row, "current_price")?,
            available_quantity: try_get_count(row, "available_quantity")?,
            availability_status,
            is_active: row.try_get("is_active")?,
        })
    }
}
