//! Promotions Repositories

mod gift_cards;
mod promotions;

pub(crate) use gift_cards::PgGiftCardsRepository;
pub(crate) use promotions::PgPromotionsRepository;
