//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::records::{CartOwner, CartRecord, CartUuid},
    identity::Identity,
    users::records::UserUuid,
};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const TOUCH_CART_SQL: &str = include_str!("../sql/touch_cart.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The owner's current cart, if one exists.
    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Identity,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let (user_uuid, session_id) = owner.owner_columns();

        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(user_uuid)
            .bind(session_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// The owner's current cart, row-locked until the transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Identity,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let (user_uuid, session_id) = owner.owner_columns();

        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(user_uuid)
            .bind(session_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Create the owner's cart unless one exists, then lock and return it.
    pub(crate) async fn ensure_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Identity,
    ) -> Result<CartRecord, sqlx::Error> {
        let (user_uuid, session_id) = owner.owner_columns();

        query(CREATE_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(user_uuid)
            .bind(session_id)
            .execute(&mut **tx)
            .await?;

        self.lock_cart(tx, owner)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn touch_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

pub(super) fn try_get_owner(row: &PgRow) -> Result<CartOwner, sqlx::Error> {
    Ok(CartOwner {
        user_uuid: row
            .try_get::<Option<Uuid>, _>("user_uuid")?
            .map(UserUuid::from_uuid),
        session_id: row.try_get("session_id")?,
    })
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner: try_get_owner(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
