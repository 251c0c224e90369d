//! Promotions Service

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::promotions::{
        PromotionsServiceError,
        data::{NewGiftCard, NewPromotion, normalize_code},
        records::{GiftCardRecord, PromotionRecord},
        repositories::{PgGiftCardsRepository, PgPromotionsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    promotions: PgPromotionsRepository,
    gift_cards: PgGiftCardsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            promotions: PgPromotionsRepository::new(),
            gift_cards: PgGiftCardsRepository::new(),
        }
    }
}

fn require_code(code: &str) -> Result<String, PromotionsServiceError> {
    let code = normalize_code(code);

    if code.is_empty() {
        return Err(PromotionsServiceError::BlankCode);
    }

    Ok(code)
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(code = tracing::field::Empty),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let promotion = NewPromotion {
            code: require_code(&promotion.code)?,
            ..promotion
        };

        tracing::Span::current().record("code", tracing::field::display(&promotion.code));

        if let (Some(starts_at), Some(ends_at)) = (promotion.starts_at, promotion.ends_at)
            && ends_at <= starts_at
        {
            return Err(PromotionsServiceError::InvalidWindow);
        }

        let mut tx = self.db.begin().await?;

        let record = self.promotions.create_promotion(&mut tx, &promotion).await?;

        tx.commit().await?;

        info!(code = %record.code, "created promotion");

        Ok(record)
    }

    async fn get_promotion(&self, code: &str) -> Result<PromotionRecord, PromotionsServiceError> {
        let code = require_code(code)?;

        let mut tx = self.db.begin().await?;

        let record = self.promotions.get_promotion(&mut tx, &code).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(name = "promotions.service.deactivate_promotion", skip(self), err)]
    async fn deactivate_promotion(&self, code: &str) -> Result<(), PromotionsServiceError> {
        let code = require_code(code)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.promotions.deactivate_promotion(&mut tx, &code).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(code = %code, "deactivated promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.create_gift_card",
        skip(self, gift_card),
        err
    )]
    async fn create_gift_card(
        &self,
        gift_card: NewGiftCard,
    ) -> Result<GiftCardRecord, PromotionsServiceError> {
        let gift_card = NewGiftCard {
            code: require_code(&gift_card.code)?,
            ..gift_card
        };

        let mut tx = self.db.begin().await?;

        let record = self.gift_cards.create_gift_card(&mut tx, &gift_card).await?;

        tx.commit().await?;

        info!(balance = %record.balance, "created gift card");

        Ok(record)
    }

    async fn get_gift_card(&self, code: &str) -> Result<GiftCardRecord, PromotionsServiceError> {
        let code = require_code(code)?;

        let mut tx = self.db.begin().await?;

        let record = self.gift_cards.get_gift_card(&mut tx, &code).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Create a promotion code. Codes are stored uppercased.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    async fn get_promotion(&self, code: &str) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Stop a promotion from being redeemed. Orders that used it keep it.
    async fn deactivate_promotion(&self, code: &str) -> Result<(), PromotionsServiceError>;

    /// Issue a gift card with an opening balance.
    async fn create_gift_card(
        &self,
        gift_card: NewGiftCard,
    ) -> Result<GiftCardRecord, PromotionsServiceError>;

    async fn get_gift_card(&self, code: &str) -> Result<GiftCardRecord, PromotionsServiceError>;
}
