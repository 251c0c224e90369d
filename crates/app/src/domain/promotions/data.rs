//! Promotions Data

use jiff::Timestamp;
use sillage::prelude::{Price, PromotionKind};

/// Canonical form of a promotion or gift-card code as typed by a shopper.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// New Promotion
#[derive(Debug, Clone)]
pub struct NewPromotion {
    pub code: String,
    pub kind: PromotionKind,
    pub minimum_subtotal: Price,

    /// Defaults to now.
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// New Gift Card
#[derive(Debug, Clone)]
pub struct NewGiftCard {
    pub code: String,
    pub balance: Price,
    pub expires_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_code("  welcome10 "), "WELCOME10");
        assert_eq!(normalize_code("GC-1234"), "GC-1234");
    }
}
