//! Inventory Reservation Ledger
//!
//! `reserved_quantity` per product size tracks stock earmarked by orders that
//! have not shipped. Every operation runs inside a caller-owned transaction so
//! reservations commit or roll back together with the order that made them.

pub mod errors;
mod ledger;

pub use errors::LedgerError;
pub(crate) use ledger::PgInventoryLedger;
