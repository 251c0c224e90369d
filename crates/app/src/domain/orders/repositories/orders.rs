//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sillage::prelude::{OrderTotals, Price};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::{
    database::{to_db_amount, try_get_amount},
    domain::{
        orders::{
            data::NewOrder,
            records::{Address, OrderRecord, OrderUuid},
        },
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const CANCEL_ORDER_SQL: &str = include_str!("../sql/cancel_order.sql");

/// Everything the orders row needs beyond the checkout request.
#[derive(Debug)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub order_number: &'a str,
    pub gift_card_amount: Price,
    pub promotion_code: Option<&'a str>,
    pub gift_card_code: Option<&'a str>,
    pub order: &'a NewOrder,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        insert: &OrderInsert<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = insert.order;
        let totals = order.totals;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(insert.uuid.into_uuid())
            .bind(insert.user_uuid.into_uuid())
            .bind(insert.order_number)
            .bind(to_db_amount(totals.subtotal, "subtotal")?)
            .bind(to_db_amount(totals.tax_amount, "tax_amount")?)
            .bind(to_db_amount(totals.shipping_cost, "shipping_cost")?)
            .bind(to_db_amount(totals.discount_amount, "discount_amount")?)
            .bind(to_db_amount(insert.gift_card_amount, "gift_card_amount")?)
            .bind(to_db_amount(totals.total_amount, "total_amount")?)
            .bind(insert.promotion_code)
            .bind(insert.gift_card_code)
            .bind(Json(&order.shipping_address))
            .bind(Json(&order.billing_address))
            .bind(order.shipping_method.trim())
            .bind(order.customer_email.trim())
            .bind(order.customer_phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// A user's orders, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn cancel_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CANCEL_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

fn try_get_status<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.try_get::<String, _>(col)?
        .parse::<T>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_number: row.try_get("order_number")?,
            order_status: try_get_status(row, "order_status")?,
            payment_status: try_get_status(row, "payment_status")?,
            fulfillment_status: try_get_status(row, "fulfillment_status")?,
            totals: OrderTotals {
                subtotal: try_get_amount(row, "subtotal")?,
                tax_amount: try_get_amount(row, "tax_amount")?,
                shipping_cost: try_get_amount(row, "shipping_cost")?,
                discount_amount: try_get_amount(row, "discount_amount")?,
                total_amount: try_get_amount(row, "total_amount")?,
            },
            gift_card_amount: try_get_amount(row, "gift_card_amount")?,
            promotion_code: row.try_get("promotion_code")?,
            gift_card_code: row.try_get("gift_card_code")?,
            shipping_address: row.try_get::<Json<Address>, _>("shipping_address")?.0,
            billing_address: row.try_get::<Json<Address>, _>("billing_address")?.0,
            shipping_method: row.try_get("shipping_method")?,
            customer_email: row.try_get("customer_email")?,
            customer_phone: row.try_get("customer_phone")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            cancelled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("cancelled_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
