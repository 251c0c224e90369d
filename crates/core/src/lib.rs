//! Sillage
//!
//! Checkout arithmetic for the Sillage storefront: cart summaries, promotion
//! and gift-card adjustments, and verification of client-computed order totals.
//!
//! All amounts are integer minor units (pence/cents).

pub mod basket;
pub mod discounts;
pub mod gift_cards;
pub mod prelude;
pub mod prices;
pub mod totals;
