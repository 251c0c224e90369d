//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use sillage::prelude::{OrderTotals, Price};
use sillage_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartLineRecord, CartUuid},
        },
        catalog::{
            MockCatalogService,
            records::{AvailabilityStatus, ProductSizeRecord, ProductUuid},
        },
        identity::{Identity, SessionId, SessionIdError},
        orders::{
            MockOrdersService,
            records::{
                Address, FulfillmentStatus, OrderDetail, OrderItemRecord, OrderItemUuid,
                OrderRecord, OrderStatus, OrderUuid, PaymentStatus,
            },
        },
        promotions::MockPromotionsService,
        users::{MockUsersService, records::UserUuid},
    },
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_SESSION_ID: &str = "guest-session-1";

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity::User(TEST_USER_UUID));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_guest(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Ok(session) = SessionId::parse(TEST_SESSION_ID) {
        depot.insert_identity(Identity::GuestSession(session));
    }

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn guest_identity() -> Result<Identity, SessionIdError> {
    SessionId::parse(TEST_SESSION_ID).map(Identity::GuestSession)
}

/// Mocks for every service; any call without an expectation fails the test.
pub(crate) struct Mocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn new() -> Self {
        Self {
            catalog: MockCatalogService::new(),
            carts: MockCartsService::new(),
            orders: MockOrdersService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            promotions: Arc::new(MockPromotionsService::new()),
            users: Arc::new(MockUsersService::new()),
            auth: Arc::new(self.auth),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks { auth, ..Mocks::new() }.into_state()
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    let state = Mocks {
        catalog,
        ..Mocks::new()
    }
    .into_state();

    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn carts_service_as_guest(carts: MockCartsService, route: Router) -> Service {
    let state = Mocks { carts, ..Mocks::new() }.into_state();

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_guest)
            .push(route),
    )
}

pub(crate) fn carts_service_as_user(carts: MockCartsService, route: Router) -> Service {
    let state = Mocks { carts, ..Mocks::new() }.into_state();

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn orders_service_as_user(orders: MockOrdersService, route: Router) -> Service {
    let state = Mocks {
        orders,
        ..Mocks::new()
    }
    .into_state();

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn orders_service_as_guest(orders: MockOrdersService, route: Router) -> Service {
    let state = Mocks {
        orders,
        ..Mocks::new()
    }
    .into_state();

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_guest)
            .push(route),
    )
}

pub(crate) fn make_size(product: ProductUuid, size_ml: u32) -> ProductSizeRecord {
    ProductSizeRecord {
        product_uuid: product,
        product_name: "Oud Noir".to_string(),
        brand_name: "Maison Verre".to_string(),
        size_ml,
        sku: format!("MV-OUD-{size_ml}"),
        price: Price::new(16_500),
        sale_price: None,
        stock_quantity: 10,
        reserved_quantity: 2,
        availability_status: AvailabilityStatus::InStock,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: CartUuid::new(),
        product_uuid: product,
        size_ml: 50,
        quantity,
        unit_price: Price::new(16_500),
        gift_wrap: false,
        sample_included: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_line(quantity: u32, unit_price: u64, current_price: u64) -> CartLineRecord {
    let mut item = make_cart_item(ProductUuid::new(), quantity);
    item.unit_price = Price::new(unit_price);

    CartLineRecord {
        item,
        product_name: "Oud Noir".to_string(),
        brand_name: "Maison Verre".to_string(),
        sku: "MV-OUD-50".to_string(),
        current_price: Price::new(current_price),
        available_quantity: 8,
        availability_status: AvailabilityStatus::InStock,
        is_active: true,
    }
}

pub(crate) fn make_address() -> Address {
    Address {
        name: "Ada Lovelace".to_string(),
        line1: "12 Rue des Parfums".to_string(),
        line2: None,
        city: "Paris".to_string(),
        region: None,
        postal_code: "75003".to_string(),
        country: "FR".to_string(),
    }
}

pub(crate) fn example_totals() -> OrderTotals {
    OrderTotals {
        subtotal: Price::new(16_500),
        tax_amount: Price::new(1_320),
        shipping_cost: Price::new(999),
        discount_amount: Price::ZERO,
        total_amount: Price::new(18_819),
    }
}

pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        order_number: "SIL-1760000000000-042".to_string(),
        order_status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        fulfillment_status: FulfillmentStatus::Unfulfilled,
        totals: example_totals(),
        gift_card_amount: Price::ZERO,
        promotion_code: None,
        gift_card_code: None,
        shipping_address: make_address(),
        billing_address: make_address(),
        shipping_method: "standard".to_string(),
        customer_email: "ada@example.com".to_string(),
        customer_phone: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        cancelled_at: None,
    }
}

pub(crate) fn make_order_detail(uuid: OrderUuid) -> OrderDetail {
    OrderDetail {
        order: make_order(uuid),
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Oud Noir".to_string(),
            brand_name: "Maison Verre".to_string(),
            size_ml: 50,
            quantity: 1,
            unit_price: Price::new(16_500),
            line_total: Price::new(16_500),
            sku: "MV-OUD-50".to_string(),
            gift_wrap: false,
            sample_included: false,
            created_at: Timestamp::UNIX_EPOCH,
        }],
    }
}
