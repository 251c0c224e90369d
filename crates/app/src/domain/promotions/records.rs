//! Promotions Records

use jiff::Timestamp;
use sillage::prelude::{Price, Promotion, PromotionKind};

/// Stored promotion code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRecord {
    pub code: String,
    pub kind: PromotionKind,
    pub minimum_subtotal: Price,
    pub is_active: bool,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl PromotionRecord {
    /// The promotion as understood by the checkout arithmetic.
    #[must_use]
    pub fn promotion(&self) -> Promotion {
        Promotion {
            code: self.code.clone(),
            kind: self.kind,
            minimum_subtotal: self.minimum_subtotal,
        }
    }

    /// Active and inside its redemption window at `now`.
    #[must_use]
    pub fn is_redeemable_at(&self, now: Timestamp) -> bool {
        self.is_active && self.starts_at <= now && self.ends_at.is_none_or(|ends| now < ends)
    }
}

/// Stored gift card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCardRecord {
    pub code: String,
    pub balance: Price,
    pub is_active: bool,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use super::*;

    fn record(is_active: bool, starts_at: Timestamp, ends_at: Option<Timestamp>) -> PromotionRecord {
        PromotionRecord {
            code: "WELCOME10".to_string(),
            kind: PromotionKind::Percentage(1_000),
            minimum_subtotal: Price::ZERO,
            is_active,
            starts_at,
            ends_at,
            created_at: starts_at,
        }
    }

    #[test]
    fn open_ended_promotion_is_redeemable_after_start() -> TestResult {
        let now = Timestamp::now();
        let promotion = record(true, now.checked_sub(1.hour())?, None);

        assert!(promotion.is_redeemable_at(now));

        Ok(())
    }

    #[test]
    fn promotion_is_not_redeemable_before_start_or_after_end() -> TestResult {
        let now = Timestamp::now();

        let future = record(true, now.checked_add(1.hour())?, None);
        let expired = record(
            true,
            now.checked_sub(2.hours())?,
            Some(now.checked_sub(1.hour())?),
        );

        assert!(!future.is_redeemable_at(now));
        assert!(!expired.is_redeemable_at(now));

        Ok(())
    }

    #[test]
    fn inactive_promotion_is_never_redeemable() -> TestResult {
        let now = Timestamp::now();

        assert!(!record(false, now.checked_sub(1.hour())?, None).is_redeemable_at(now));

        Ok(())
    }

    #[test]
    fn promotion_carries_code_kind_and_minimum() {
        let now = Timestamp::now();
        let promotion = record(true, now, None).promotion();

        assert_eq!(promotion.code, "WELCOME10");
        assert_eq!(promotion.kind, PromotionKind::Percentage(1_000));
        assert_eq!(promotion.minimum_subtotal, Price::ZERO);
    }
}
