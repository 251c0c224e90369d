//! Sillage Domain Concerns

pub mod carts;
pub mod catalog;
pub mod identity;
pub mod inventory;
pub mod orders;
pub mod promotions;
pub mod users;
