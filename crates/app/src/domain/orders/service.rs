//! Orders Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sillage::prelude::{Basket, BasketLine, GiftCardBalance, Price, apply_promotion};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartLineRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        catalog::records::AvailabilityStatus,
        identity::Identity,
        inventory::PgInventoryLedger,
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            numbers::order_number,
            records::{OrderDetail, OrderRecord, OrderUuid},
            repositories::{
                OrderInsert, OrderItemSnapshot, PgOrderItemsRepository, PgOrdersRepository,
            },
        },
        promotions::{
            data::normalize_code,
            repositories::{PgGiftCardsRepository, PgPromotionsRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    order_items: PgOrderItemsRepository,
    carts: PgCartsRepository,
    cart_items: PgCartItemsRepository,
    promotions: PgPromotionsRepository,
    gift_cards: PgGiftCardsRepository,
    ledger: PgInventoryLedger,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            order_items: PgOrderItemsRepository::new(),
            carts: PgCartsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            promotions: PgPromotionsRepository::new(),
            gift_cards: PgGiftCardsRepository::new(),
            ledger: PgInventoryLedger::new(),
        }
    }
}

fn require_user(identity: &Identity) -> Result<UserUuid, OrdersServiceError> {
    identity
        .user()
        .ok_or(OrdersServiceError::AuthenticationRequired)
}

fn optional_code(code: Option<&str>) -> Option<String> {
    code.map(normalize_code).filter(|code| !code.is_empty())
}

/// Check a cart line against the live catalog before it is ordered.
fn revalidate_line(line: &CartLineRecord) -> Result<(), OrdersServiceError> {
    if !line.is_active {
        return Err(OrdersServiceError::ProductSizeNotAvailable);
    }

    if line.availability_status != AvailabilityStatus::InStock {
        return Err(OrdersServiceError::ProductOutOfStock);
    }

    if line.current_price != line.item.unit_price {
        return Err(OrdersServiceError::PriceChanged {
            expected: line.item.unit_price,
            current: line.current_price,
        });
    }

    Ok(())
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, identity, order),
        fields(
            user_uuid = tracing::field::Empty,
            order_uuid = tracing::field::Empty,
            order_number = tracing::field::Empty,
            line_count = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(
        &self,
        identity: &Identity,
        order: NewOrder,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let user = require_user(identity)?;

        let span = Span::current();

        span.record("user_uuid", tracing::field::display(user));

        order.validate()?;

        let promotion_code = optional_code(order.promotion_code.as_deref());
        let gift_card_code = optional_code(order.gift_card_code.as_deref());

        let mut tx = self.db.begin().await?;

        // Serialises concurrent checkouts of the same cart.
        let cart = self
            .carts
            .lock_cart(&mut tx, identity)
            .await?
            .ok_or(OrdersServiceError::CartEmpty)?;

        let lines = self.cart_items.list_cart_lines(&mut tx, cart.uuid).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::CartEmpty);
        }

        span.record("line_count", lines.len());

        for line in &lines {
            revalidate_line(line)?;
        }

        let subtotal = lines
            .iter()
            .map(|line| BasketLine::new(line.item.quantity, line.item.unit_price))
            .collect::<Basket>()
            .subtotal()?;

        let discount = match promotion_code.as_deref() {
            Some(code) => {
                let promotion = self
                    .promotions
                    .find_redeemable_promotion(&mut tx, code)
                    .await?
                    .ok_or(OrdersServiceError::InvalidPromotion)?;

                apply_promotion(
                    &promotion.promotion(),
                    subtotal,
                    order.totals.shipping_cost,
                )?
                .discount
            }
            None => Price::ZERO,
        };

        let gift_card = match gift_card_code.as_deref() {
            Some(code) => Some(
                self.gift_cards
                    .lock_redeemable_gift_card(&mut tx, code)
                    .await?
                    .ok_or(OrdersServiceError::InvalidGiftCard)?,
            ),
            None => None,
        };

        let gift_card_amount = match &gift_card {
            Some(card) => {
                GiftCardBalance::new(card.balance)
                    .redeem(order.totals.amount_before_gift_card()?)
                    .applied
            }
            None => Price::ZERO,
        };

        order.totals.verify(subtotal, discount, gift_card_amount)?;

        if let Some(card) = &gift_card
            && gift_card_amount > Price::ZERO
        {
            self.gift_cards
                .debit(&mut tx, &card.code, gift_card_amount)
                .await?
                .ok_or(OrdersServiceError::InvalidGiftCard)?;
        }

        let number = order_number(Timestamp::now(), &mut rand::thread_rng());

        let record = self
            .orders
            .create_order(
                &mut tx,
                &OrderInsert {
                    uuid: OrderUuid::new(),
                    user_uuid: user,
                    order_number: &number,
                    gift_card_amount,
                    promotion_code: promotion_code.as_deref(),
                    gift_card_code: gift_card.as_ref().map(|card| card.code.as_str()),
                    order: &order,
                },
            )
            .await?;

        span.record("order_uuid", tracing::field::display(record.uuid));
        span.record("order_number", tracing::field::display(&record.order_number));

        let mut items = Vec::with_capacity(lines.len());

        for line in &lines {
            let snapshot = OrderItemSnapshot::from_cart_line(line)?;

            items.push(
                self.order_items
                    .create_order_item(&mut tx, record.uuid, &snapshot)
                    .await?,
            );

            self.ledger
                .reserve(
                    &mut tx,
                    snapshot.product_uuid,
                    snapshot.size_ml,
                    snapshot.quantity,
                )
                .await?;
        }

        self.cart_items.clear_cart_items(&mut tx, cart.uuid).await?;
        self.carts.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(
            order_uuid = %record.uuid,
            order_number = %record.order_number,
            total_amount = %record.totals.total_amount,
            "created order"
        );

        Ok(OrderDetail {
            order: record,
            items,
        })
    }

    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self, identity),
        fields(order_uuid = %order),
        err
    )]
    async fn get_order(
        &self,
        identity: &Identity,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let user = require_user(identity)?;

        let mut tx = self.db.begin().await?;

        let record = self.orders.get_order(&mut tx, order).await?;

        if record.user_uuid != user {
            return Err(OrdersServiceError::AccessDenied);
        }

        let items = self.order_items.list_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(OrderDetail {
            order: record,
            items,
        })
    }

    #[tracing::instrument(
        name = "orders.service.list_orders",
        skip(self, identity),
        fields(user_uuid = tracing::field::Empty, count = tracing::field::Empty),
        err
    )]
    async fn list_orders(&self, identity: &Identity) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let user = require_user(identity)?;
        let span = Span::current();

        span.record("user_uuid", tracing::field::display(user));

        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, user).await?;

        tx.commit().await?;

        span.record("count", orders.len());

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.cancel_order",
        skip(self, identity),
        fields(order_uuid = %order),
        err
    )]
    async fn cancel_order(
        &self,
        identity: &Identity,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let user = require_user(identity)?;

        let mut tx = self.db.begin().await?;

        let record = self.orders.lock_order(&mut tx, order).await?;

        if record.user_uuid != user {
            return Err(OrdersServiceError::AccessDenied);
        }

        if !record.is_cancellable() {
            return Err(OrdersServiceError::NotCancellable);
        }

        let items = self.order_items.list_order_items(&mut tx, order).await?;

        for item in &items {
            self.ledger
                .release(&mut tx, item.product_uuid, item.size_ml, item.quantity)
                .await?;
        }

        if let Some(code) = &record.gift_card_code
            && record.gift_card_amount > Price::ZERO
        {
            self.gift_cards
                .credit(&mut tx, code, record.gift_card_amount)
                .await?;
        }

        let cancelled = self.orders.cancel_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(
            order_uuid = %cancelled.uuid,
            released_lines = items.len(),
            refunded = %cancelled.gift_card_amount,
            "cancelled order"
        );

        Ok(OrderDetail {
            order: cancelled,
            items,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into an order in one transaction: snapshot the
    /// lines, reserve stock, apply the promotion and gift card, then empty the
    /// cart. Nothing is written unless every step succeeds.
    async fn create_order(
        &self,
        identity: &Identity,
        order: NewOrder,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// One of the caller's orders, with its items.
    async fn get_order(
        &self,
        identity: &Identity,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// The caller's orders, newest first, without items.
    async fn list_orders(&self, identity: &Identity) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Cancel a pending, unfulfilled order, returning its stock and any
    /// gift-card amount.
    async fn cancel_order(
        &self,
        identity: &Identity,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError>;
}
