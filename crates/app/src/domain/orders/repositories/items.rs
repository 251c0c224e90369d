//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sillage::prelude::{Price, PriceError};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{to_db_amount, to_db_u32, try_get_amount, try_get_u32},
    domain::{
        carts::records::CartLineRecord,
        catalog::records::ProductUuid,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

/// A cart line frozen for an order.
#[derive(Debug, Clone)]
pub(crate) struct OrderItemSnapshot {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub brand_name: String,
    pub size_ml: u32,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
    pub sku: String,
    pub gift_wrap: bool,
    pub sample_included: bool,
}

impl OrderItemSnapshot {
    pub(crate) fn from_cart_line(
        line: &CartLineRecord,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            product_uuid: line.item.product_uuid,
            product_name: line.product_name.clone(),
            brand_name: line.brand_name.clone(),
            size_ml: line.item.size_ml,
            quantity: line.item.quantity,
            unit_price: line.item.unit_price,
            line_total: line.item.unit_price.times(line.item.quantity)?,
            sku: line.sku.clone(),
            gift_wrap: line.item.gift_wrap,
            sample_included: line.item.sample_included,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &OrderItemSnapshot,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.product_name)
            .bind(&item.brand_name)
            .bind(to_db_u32(item.size_ml, "size_ml")?)
            .bind(to_db_u32(item.quantity, "quantity")?)
            .bind(to_db_amount(item.unit_price, "unit_price")?)
            .bind(to_db_amount(item.line_total, "line_total")?)
            .bind(&item.sku)
            .bind(item.gift_wrap)
            .bind(item.sample_included)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            brand_name: row.try_get("brand_name")?,
            size_ml: try_get_u32(row, "size_ml")?,
            quantity: try_get_u32(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            line_total: try_get_amount(row, "line_total")?,
            sku: row.try_get("sku")?,
            gift_wrap: row.try_get("gift_wrap")?,
            sample_included: row.try_get("sample_included")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
