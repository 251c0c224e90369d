//! Gift Cards Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sillage::prelude::Price;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{to_db_amount, try_get_amount},
    domain::promotions::{data::NewGiftCard, records::GiftCardRecord},
};

const CREATE_GIFT_CARD_SQL: &str = include_str!("../sql/create_gift_card.sql");
const GET_GIFT_CARD_SQL: &str = include_str!("../sql/get_gift_card.sql");
const LOCK_REDEEMABLE_GIFT_CARD_SQL: &str = include_str!("../sql/lock_redeemable_gift_card.sql");
const DEBIT_GIFT_CARD_SQL: &str = include_str!("../sql/debit_gift_card.sql");
const CREDIT_GIFT_CARD_SQL: &str = include_str!("../sql/credit_gift_card.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGiftCardsRepository;

impl PgGiftCardsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_gift_card(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gift_card: &NewGiftCard,
    ) -> Result<GiftCardRecord, sqlx::Error> {
        query_as::<Postgres, GiftCardRecord>(CREATE_GIFT_CARD_SQL)
            .bind(&gift_card.code)
            .bind(to_db_amount(gift_card.balance, "balance")?)
            .bind(gift_card.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_gift_card(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<GiftCardRecord, sqlx::Error> {
        query_as::<Postgres, GiftCardRecord>(GET_GIFT_CARD_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    /// An active, unexpired card, row-locked until the transaction ends.
    pub(crate) async fn lock_redeemable_gift_card(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<GiftCardRecord>, sqlx::Error> {
        query_as::<Postgres, GiftCardRecord>(LOCK_REDEEMABLE_GIFT_CARD_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Take `amount` off the balance. Returns `None` when the balance is too
    /// small, leaving it untouched.
    pub(crate) async fn debit(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        amount: Price,
    ) -> Result<Option<GiftCardRecord>, sqlx::Error> {
        query_as::<Postgres, GiftCardRecord>(DEBIT_GIFT_CARD_SQL)
            .bind(code)
            .bind(to_db_amount(amount, "amount")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn credit(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        amount: Price,
    ) -> Result<GiftCardRecord, sqlx::Error> {
        query_as::<Postgres, GiftCardRecord>(CREDIT_GIFT_CARD_SQL)
            .bind(code)
            .bind(to_db_amount(amount, "amount")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for GiftCardRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("code")?,
            balance: try_get_amount(row, "balance")?,
            is_active: row.try_get("is_active")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
