//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem, UpdatedCartItem},
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, OwnedCartItemRecord},
            repositories::{CartItemUpsert, PgCartItemsRepository, PgCartsRepository},
            views::CartView,
        },
        catalog::{records::AvailabilityStatus, repository::PgCatalogRepository},
        identity::{Identity, SessionId},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    catalog_repository: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
        }
    }

    async fn lock_owned_item(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        identity: &Identity,
        item: CartItemUuid,
    ) -> Result<OwnedCartItemRecord, CartsServiceError> {
        let owned = self
            .items_repository
            .lock_cart_item(tx, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        if !owned.owner.is(identity) {
            return Err(CartsServiceError::AccessDenied);
        }

        Ok(owned)
    }
}

fn ensure_available(available: u64, requested: u32) -> Result<(), CartsServiceError> {
    let requested = u64::from(requested);

    if requested > available {
        return Err(CartsServiceError::InsufficientStock {
            available,
            requested,
        });
    }

    Ok(())
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(name = "carts.service.get_cart", skip(self), err)]
    async fn get_cart(&self, identity: &Identity) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.find_cart(&mut tx, identity).await? else {
            return Ok(CartView::default());
        };

        let lines = self
            .items_repository
            .list_cart_lines(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(CartView::from_lines(Some(cart.uuid), lines)?)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            product_uuid = %item.product_uuid,
            size_ml = item.size_ml,
            quantity = item.quantity
        ),
        err
    )]
    async fn add_item(
        &self,
        identity: &Identity,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let size = self
            .catalog_repository
            .find_product_size(&mut tx, item.product_uuid, item.size_ml)
            .await?
            .filter(|size| size.is_active)
            .ok_or(CartsServiceError::ProductSizeNotAvailable)?;

        if !size.is_in_stock() {
            return Err(CartsServiceError::ProductOutOfStock);
        }

        let current = size.effective_price();

        if let Some(expected) = item.unit_price
            && expected != current
        {
            return Err(CartsServiceError::PriceChanged { expected, current });
        }

        ensure_available(size.available_quantity(), item.quantity)?;

        let cart = self.carts_repository.ensure_cart(&mut tx, identity).await?;

        let line = self
            .items_repository
            .upsert_cart_item(
                &mut tx,
                cart.uuid,
                &CartItemUpsert {
                    product_uuid: item.product_uuid,
                    size_ml: item.size_ml,
                    quantity: item.quantity,
                    unit_price: current,
                    gift_wrap: item.gift_wrap,
                    sample_included: item.sample_included,
                },
            )
            .await?;

        // Checked after the upsert so the merged quantity is what counts.
        ensure_available(size.available_quantity(), line.quantity)?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        debug!(cart_uuid = %cart.uuid, item_uuid = %line.uuid, "added cart item");

        Ok(line)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self, update),
        fields(item_uuid = %item),
        err
    )]
    async fn update_item(
        &self,
        identity: &Identity,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<UpdatedCartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let OwnedCartItemRecord { item: current, .. } =
            self.lock_owned_item(&mut tx, identity, item).await?;

        let quantity = update.quantity.unwrap_or(current.quantity);

        if quantity == 0 {
            self.items_repository
                .delete_cart_item(&mut tx, current.cart_uuid, item)
                .await?;

            self.carts_repository
                .touch_cart(&mut tx, current.cart_uuid)
                .await?;

            tx.commit().await?;

            return Ok(UpdatedCartItem::Removed);
        }

        if quantity > current.quantity {
            let size = self
                .catalog_repository
                .find_product_size(&mut tx, current.product_uuid, current.size_ml)
                .await?
                .ok_or(CartsServiceError::ProductSizeNotAvailable)?;

            ensure_available(size.available_quantity(), quantity)?;
        }

        let updated = self
            .items_repository
            .update_cart_item(
                &mut tx,
                item,
                quantity,
                update.gift_wrap.unwrap_or(current.gift_wrap),
                update.sample_included.unwrap_or(current.sample_included),
            )
            .await?;

        self.carts_repository
            .touch_cart(&mut tx, current.cart_uuid)
            .await?;

        tx.commit().await?;

        Ok(UpdatedCartItem::Updated(updated))
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        identity: &Identity,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let owned = self.lock_owned_item(&mut tx, identity, item).await?;

        self.items_repository
            .delete_cart_item(&mut tx, owned.item.cart_uuid, item)
            .await?;

        self.carts_repository
            .touch_cart(&mut tx, owned.item.cart_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.service.clear", skip(self), err)]
    async fn clear(&self, identity: &Identity) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.lock_cart(&mut tx, identity).await? else {
            return Ok(0);
        };

        let removed = self
            .items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(removed)
    }

    #[tracing::instrument(
        name = "carts.service.merge_guest_cart",
        skip(self, session),
        fields(user_uuid = %user),
        err
    )]
    async fn merge_guest_cart(
        &self,
        user: UserUuid,
        session: &SessionId,
    ) -> Result<CartView, CartsServiceError> {
        let owner = Identity::User(user);
        let guest = Identity::GuestSession(session.clone());

        let mut tx = self.db.begin().await?;

        let Some(guest_cart) = self.carts_repository.lock_cart(&mut tx, &guest).await? else {
            let Some(cart) = self.carts_repository.find_cart(&mut tx, &owner).await? else {
                return Ok(CartView::default());
            };

            let lines = self
                .items_repository
                .list_cart_lines(&mut tx, cart.uuid)
                .await?;

            tx.commit().await?;

            return Ok(CartView::from_lines(Some(cart.uuid), lines)?);
        };

        let cart = self.carts_repository.ensure_cart(&mut tx, &owner).await?;

        let guest_lines = self
            .items_repository
            .list_cart_lines(&mut tx, guest_cart.uuid)
            .await?;

        let mut merged = 0_usize;

        for guest_line in guest_lines {
            if !guest_line.is_active
                || guest_line.availability_status != AvailabilityStatus::InStock
            {
                debug!(
                    product_uuid = %guest_line.item.product_uuid,
                    size_ml = guest_line.item.size_ml,
                    "dropping unavailable guest line"
                );

                continue;
            }

            ensure_available(guest_line.available_quantity, guest_line.item.quantity)?;

            let line = self
                .items_repository
                .upsert_cart_item(
                    &mut tx,
                    cart.uuid,
                    &CartItemUpsert {
                        product_uuid: guest_line.item.product_uuid,
                        size_ml: guest_line.item.size_ml,
                        quantity: guest_line.item.quantity,
                        unit_price: guest_line.current_price,
                        gift_wrap: guest_line.item.gift_wrap,
                        sample_included: guest_line.item.sample_included,
                    },
                )
                .await?;

            ensure_available(guest_line.available_quantity, line.quantity)?;

            merged += 1;
        }

        self.carts_repository
            .delete_cart(&mut tx, guest_cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let lines = self
            .items_repository
            .list_cart_lines(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        info!(
            cart_uuid = %cart.uuid,
            guest_cart_uuid = %guest_cart.uuid,
            merged,
            "merged guest cart"
        );

        Ok(CartView::from_lines(Some(cart.uuid), lines)?)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The shopper's current cart. A shopper without a cart gets an empty
    /// view and no cart is created.
    async fn get_cart(&self, identity: &Identity) -> Result<CartView, CartsServiceError>;

    /// Add units of a product size, creating the cart on first use and
    /// merging into an existing line for the same size.
    async fn add_item(
        &self,
        identity: &Identity,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Change a line's quantity or options. A quantity of zero removes it.
    async fn update_item(
        &self,
        identity: &Identity,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<UpdatedCartItem, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(
        &self,
        identity: &Identity,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line, keeping the cart. Returns the number removed.
    async fn clear(&self, identity: &Identity) -> Result<u64, CartsServiceError>;

    /// Move a guest session's lines into the user's cart.
    async fn merge_guest_cart(
        &self,
        user: UserUuid,
        session: &SessionId,
    ) -> Result<CartView, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sillage::prelude::Price;
    use testresult::TestResult;

    use crate::{
        domain::catalog::{CatalogService, records::AvailabilityStatus},
        test::{
            TestContext,
            helpers::{add_line, guest, new_size},
        },
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_without_cart_returns_empty_view() -> TestResult {
        let ctx = TestContext::new().await;

        let view = ctx.carts.get_cart(&guest("no-cart-yet")?).await?;

        assert!(view.cart_uuid.is_none());
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, Price::ZERO);
        assert_eq!(view.item_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_creates_cart_lazily() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("lazy-cart")?;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let item = add_line(&ctx, &shopper, product, 50, 1).await?;

        assert_eq!(item.product_uuid, product);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, Price::new(16_500));

        let view = ctx.carts.get_cart(&shopper).await?;

        assert_eq!(view.cart_uuid, Some(item.cart_uuid));
        assert_eq!(view.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_size_twice_increments_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("double-add")?;
        let product = ctx.create_sized_product(5, 3_000, 10).await?;

        let first = add_line(&ctx, &shopper, product, 5, 2).await?;
        let second = add_line(&ctx, &shopper, product, 5, 3).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(second.quantity, 5);

        let view = ctx.carts.get_cart(&shopper).await?;

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 5);
        assert_eq!(view.subtotal, Price::new(15_000));

        Ok(())
    }

    #[tokio::test]
    async fn item_count_sums_quantities_across_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("count")?;
        let first = ctx.create_sized_product(50, 16_500, 10).await?;
        let second = ctx.create_sized_product(100, 24_000, 10).await?;

        add_line(&ctx, &shopper, first, 50, 7).await?;
        add_line(&ctx, &shopper, second, 100, 2).await?;

        let view = ctx.carts.get_cart(&shopper).await?;

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 9);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_zero_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let result = add_line(&ctx, &guest("zero")?, product, 50, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_size_is_not_available() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let result = add_line(&ctx, &guest("unknown-size")?, product, 75, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductSizeNotAvailable)),
            "expected ProductSizeNotAvailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_inactive_size_is_not_available() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        ctx.catalog.set_size_active(product, 50, false).await?;

        let result = add_line(&ctx, &guest("inactive")?, product, 50, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductSizeNotAvailable)),
            "expected ProductSizeNotAvailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_out_of_stock_status_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Oud Noir", "Maison Verre").await?;

        let mut size = new_size(product, 50, 16_500, 10);
        size.availability_status = AvailabilityStatus::OutOfStock;
        ctx.catalog.create_product_size(size).await?;

        let result = add_line(&ctx, &guest("oos")?, product, 50, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductOutOfStock)),
            "expected ProductOutOfStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_with_stale_client_price_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let result = ctx
            .carts
            .add_item(
                &guest("stale")?,
                NewCartItem {
                    product_uuid: product,
                    size_ml: 50,
                    quantity: 1,
                    unit_price: Some(Price::new(15_000)),
                    gift_wrap: false,
                    sample_included: false,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::PriceChanged { expected, current })
                    if expected == Price::new(15_000) && current == Price::new(16_500)
            ),
            "expected PriceChanged, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_snapshots_sale_price() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        ctx.catalog
            .reprice_size(product, 50, Price::new(16_500), Some(Price::new(14_000)))
            .await?;

        let item = add_line(&ctx, &guest("sale")?, product, 50, 1).await?;

        assert_eq!(item.unit_price, Price::new(14_000));

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_cart_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("short")?;
        let product = ctx.create_sized_product(50, 16_500, 3).await?;

        add_line(&ctx, &shopper, product, 50, 2).await?;

        let result = add_line(&ctx, &shopper, product, 50, 2).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock {
                    available: 3,
                    requested: 4
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let view = ctx.carts.get_cart(&shopper).await?;

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn quantity_beyond_column_range_is_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("huge-quantity")?;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let result = add_line(&ctx, &shopper, product, 50, u32::MAX).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock {
                    available: 10,
                    requested
                }) if requested == u64::from(u32::MAX)
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let view = ctx.carts.get_cart(&shopper).await?;

        assert!(view.cart_uuid.is_none(), "no cart is created");

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_on_first_add_creates_no_line() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("short-first")?;
        let product = ctx.create_sized_product(50, 16_500, 1).await?;

        let result = add_line(&ctx, &shopper, product, 50, 2).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );

        let view = ctx.carts.get_cart(&shopper).await?;

        assert!(view.cart_uuid.is_none(), "cart creation should roll back");
        assert!(view.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn reserved_stock_is_not_available_to_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_sized_product(50, 16_500, 3).await?;

        ctx.reserve(product, 50, 2).await?;

        let result = add_line(&ctx, &guest("reserved")?, product, 50, 2).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock {
                    available: 1,
                    requested: 2
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_never_duplicate_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("racer")?;
        let product = ctx.create_sized_product(50, 16_500, 100).await?;

        let carts = Arc::new(ctx.carts.clone());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let carts = Arc::clone(&carts);
            let shopper = shopper.clone();

            handles.push(tokio::spawn(async move {
                carts
                    .add_item(
                        &shopper,
                        NewCartItem {
                            product_uuid: product,
                            size_ml: 50,
                            quantity: 1,
                            unit_price: None,
                            gift_wrap: false,
                            sample_included: false,
                        },
                    )
                    .await
            }));
        }

        for handle in handles {
            handle.await??;
        }

        let view = ctx.carts.get_cart(&shopper).await?;

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 8);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_to_zero_removes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("to-zero")?;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let item = add_line(&ctx, &shopper, product, 50, 2).await?;

        let updated = ctx
            .carts
            .update_item(
                &shopper,
                item.uuid,
                CartItemUpdate {
                    quantity: Some(0),
                    ..CartItemUpdate::default()
                },
            )
            .await?;

        assert!(
            matches!(updated, UpdatedCartItem::Removed),
            "expected Removed, got {updated:?}"
        );

        let view = ctx.carts.get_cart(&shopper).await?;

        assert!(view.items.is_empty());
        assert!(view.cart_uuid.is_some(), "cart row is kept");

        Ok(())
    }

    #[tokio::test]
    async fn update_item_changes_options_and_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("options")?;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let item = add_line(&ctx, &shopper, product, 50, 2).await?;

        let updated = ctx
            .carts
            .update_item(
                &shopper,
                item.uuid,
                CartItemUpdate {
                    quantity: Some(4),
                    gift_wrap: Some(true),
                    sample_included: None,
                },
            )
            .await?;

        let UpdatedCartItem::Updated(updated) = updated else {
            return Err("expected Updated".into());
        };

        assert_eq!(updated.quantity, 4);
        assert!(updated.gift_wrap);
        assert!(!updated.sample_included);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_increase_beyond_stock_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("increase")?;
        let product = ctx.create_sized_product(50, 16_500, 3).await?;

        let item = add_line(&ctx, &shopper, product, 50, 2).await?;

        let result = ctx
            .carts
            .update_item(
                &shopper,
                item.uuid,
                CartItemUpdate {
                    quantity: Some(4),
                    ..CartItemUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_item_decrease_skips_stock_check() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("decrease")?;
        let product = ctx.create_sized_product(50, 16_500, 5).await?;

        let item = add_line(&ctx, &shopper, product, 50, 4).await?;

        ctx.catalog.set_stock(product, 50, 1).await?;

        let updated = ctx
            .carts
            .update_item(
                &shopper,
                item.uuid,
                CartItemUpdate {
                    quantity: Some(3),
                    ..CartItemUpdate::default()
                },
            )
            .await?;

        assert!(
            matches!(updated, UpdatedCartItem::Updated(ref line) if line.quantity == 3),
            "expected Updated with quantity 3, got {updated:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_item_returns_item_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .update_item(
                &guest("nobody")?,
                CartItemUuid::new(),
                CartItemUpdate::default(),
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_shoppers_cannot_touch_a_line() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("owner")?;
        let intruder = Identity::User(ctx.create_user("mallory@example.com").await?);
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let item = add_line(&ctx, &owner, product, 50, 1).await?;

        let update = ctx
            .carts
            .update_item(
                &intruder,
                item.uuid,
                CartItemUpdate {
                    quantity: Some(0),
                    ..CartItemUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(update, Err(CartsServiceError::AccessDenied)),
            "expected AccessDenied, got {update:?}"
        );

        let remove = ctx.carts.remove_item(&intruder, item.uuid).await;

        assert!(
            matches!(remove, Err(CartsServiceError::AccessDenied)),
            "expected AccessDenied, got {remove:?}"
        );

        let view = ctx.carts.get_cart(&owner).await?;

        assert_eq!(view.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("remove")?;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        let item = add_line(&ctx, &shopper, product, 50, 1).await?;

        ctx.carts.remove_item(&shopper, item.uuid).await?;

        let result = ctx.carts.remove_item(&shopper, item.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound on second removal, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_removes_all_lines_and_keeps_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("clear")?;
        let first = ctx.create_sized_product(50, 16_500, 10).await?;
        let second = ctx.create_sized_product(100, 24_000, 10).await?;

        let item = add_line(&ctx, &shopper, first, 50, 1).await?;
        add_line(&ctx, &shopper, second, 100, 1).await?;

        assert_eq!(ctx.carts.clear(&shopper).await?, 2);

        let view = ctx.carts.get_cart(&shopper).await?;

        assert_eq!(view.cart_uuid, Some(item.cart_uuid));
        assert!(view.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_without_cart_removes_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.carts.clear(&guest("empty")?).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn merge_guest_cart_combines_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ada@example.com").await?;
        let session = SessionId::parse("guest-merge")?;
        let shopper = Identity::User(user);
        let visitor = Identity::GuestSession(session.clone());

        let shared = ctx.create_sized_product(50, 16_500, 10).await?;
        let guest_only = ctx.create_sized_product(100, 24_000, 10).await?;

        add_line(&ctx, &shopper, shared, 50, 1).await?;
        add_line(&ctx, &visitor, shared, 50, 2).await?;
        add_line(&ctx, &visitor, guest_only, 100, 1).await?;

        let view = ctx.carts.merge_guest_cart(user, &session).await?;

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 4);

        let guest_view = ctx.carts.get_cart(&visitor).await?;

        assert!(guest_view.cart_uuid.is_none(), "guest cart is deleted");

        Ok(())
    }

    #[tokio::test]
    async fn merge_exceeding_stock_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ada@example.com").await?;
        let session = SessionId::parse("guest-overflow")?;
        let product = ctx.create_sized_product(50, 16_500, 3).await?;

        add_line(&ctx, &Identity::User(user), product, 50, 2).await?;
        add_line(&ctx, &Identity::GuestSession(session.clone()), product, 50, 2).await?;

        let result = ctx.carts.merge_guest_cart(user, &session).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );

        let guest_view = ctx
            .carts
            .get_cart(&Identity::GuestSession(session))
            .await?;

        assert_eq!(guest_view.item_count, 2, "guest cart is untouched");

        Ok(())
    }

    #[tokio::test]
    async fn merge_takes_live_price_and_drops_unavailable_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ada@example.com").await?;
        let session = SessionId::parse("guest-stale")?;
        let visitor = Identity::GuestSession(session.clone());

        let repriced = ctx.create_sized_product(50, 16_500, 10).await?;
        let retired = ctx.create_sized_product(100, 24_000, 10).await?;

        add_line(&ctx, &Identity::User(user), repriced, 50, 1).await?;
        add_line(&ctx, &visitor, repriced, 50, 1).await?;
        add_line(&ctx, &visitor, retired, 100, 1).await?;

        ctx.catalog
            .reprice_size(repriced, 50, Price::new(17_500), None)
            .await?;
        ctx.catalog.set_size_active(retired, 100, false).await?;

        let view = ctx.carts.merge_guest_cart(user, &session).await?;

        assert_eq!(view.items.len(), 1, "inactive guest line is dropped");
        assert_eq!(view.item_count, 2);

        let line = view.items.first().ok_or("missing line")?;

        assert_eq!(line.line.item.unit_price, Price::new(17_500));
        assert!(!line.price_changed);

        let guest_view = ctx.carts.get_cart(&visitor).await?;

        assert!(guest_view.cart_uuid.is_none(), "guest cart is deleted");

        Ok(())
    }

    #[tokio::test]
    async fn merge_without_guest_cart_returns_user_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("ada@example.com").await?;
        let product = ctx.create_sized_product(50, 16_500, 3).await?;

        add_line(&ctx, &Identity::User(user), product, 50, 1).await?;

        let view = ctx
            .carts
            .merge_guest_cart(user, &SessionId::parse("never-used")?)
            .await?;

        assert_eq!(view.item_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn reprice_flags_price_change_but_keeps_snapshot() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = guest("live-price")?;
        let product = ctx.create_sized_product(50, 16_500, 10).await?;

        add_line(&ctx, &shopper, product, 50, 1).await?;

        ctx.catalog
            .reprice_size(product, 50, Price::new(17_500), None)
            .await?;

        let view = ctx.carts.get_cart(&shopper).await?;
        let line = view.items.first().ok_or("missing line")?;

        assert!(line.price_changed);
        assert_eq!(line.line.current_price, Price::new(17_500));
        assert_eq!(line.line.item.unit_price, Price::new(16_500));
        assert_eq!(view.subtotal, Price::new(16_500));

        Ok(())
    }
}
