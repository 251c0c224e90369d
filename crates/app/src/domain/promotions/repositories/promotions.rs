//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sillage::prelude::{Price, PromotionKind};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_db_amount, try_get_amount},
    domain::promotions::{data::NewPromotion, records::PromotionRecord},
};

const COLUMN_VALUE: &str = "value";

const CREATE_PROMOTION_SQL: &str = include_str!("../sql/create_promotion.sql");
const GET_PROMOTION_SQL: &str = include_str!("../sql/get_promotion.sql");
const FIND_REDEEMABLE_PROMOTION_SQL: &str = include_str!("../sql/find_redeemable_promotion.sql");
const DEACTIVATE_PROMOTION_SQL: &str = include_str!("../sql/deactivate_promotion.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: &NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let (kind, value) = to_kind_sql_values(promotion.kind)?;

        query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(&promotion.code)
            .bind(kind)
            .bind(value)
            .bind(to_db_amount(promotion.minimum_subtotal, "minimum_subtotal")?)
            .bind(promotion.starts_at.map(SqlxTimestamp::from))
            .bind(promotion.ends_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    /// An active promotion whose window contains the database clock.
    pub(crate) async fn find_redeemable_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(FIND_REDEEMABLE_PROMOTION_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_PROMOTION_SQL)
            .bind(code)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn to_kind_sql_values(kind: PromotionKind) -> Result<(&'static str, i64), sqlx::Error> {
    match kind {
        PromotionKind::Percentage(basis_points) => Ok(("percentage", i64::from(basis_points))),
        PromotionKind::FixedAmount(amount) => {
            Ok(("fixed_amount", to_db_amount(amount, COLUMN_VALUE)?))
        }
        PromotionKind::FreeShipping => Ok(("free_shipping", 0)),
    }
}

fn try_get_kind(row: &PgRow) -> Result<PromotionKind, sqlx::Error> {
    let kind: String = row.try_get("kind")?;

    match kind.as_str() {
        "percentage" => {
            let value: i64 = row.try_get(COLUMN_VALUE)?;

            u32::try_from(value)
                .map(PromotionKind::Percentage)
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: COLUMN_VALUE.to_string(),
                    source: Box::new(e),
                })
        }
        "fixed_amount" => Ok(PromotionKind::FixedAmount(try_get_amount(row, COLUMN_VALUE)?)),
        "free_shipping" => Ok(PromotionKind::FreeShipping),
        other => Err(sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: format!("unknown promotion kind {other}").into(),
        }),
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("code")?,
            kind: try_get_kind(row)?,
            minimum_subtotal: try_get_amount(row, "minimum_subtotal")?,
            is_active: row.try_get("is_active")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row
                .try_get::<Option<SqlxTimestamp>, _>("ends_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
