//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{OrderItemSnapshot, PgOrderItemsRepository};
pub(crate) use orders::{OrderInsert, PgOrdersRepository};
