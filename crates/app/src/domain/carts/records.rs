//! Cart Records

use jiff::Timestamp;
use sillage::prelude::Price;

use crate::{
    domain::{
        catalog::records::{AvailabilityStatus, ProductUuid},
        identity::Identity,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Who a cart belongs to, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOwner {
    pub user_uuid: Option<UserUuid>,
    pub session_id: Option<String>,
}

impl CartOwner {
    /// Whether `identity` is this cart's owner.
    #[must_use]
    pub fn is(&self, identity: &Identity) -> bool {
        match identity {
            Identity::User(user) => self.user_uuid == Some(*user),
            Identity::GuestSession(session) => {
                self.session_id.as_deref() == Some(session.as_str())
            }
        }
    }
}

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: CartOwner,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub size_ml: u32,
    pub quantity: u32,

    /// Price captured when the line was added.
    pub unit_price: Price,
    pub gift_wrap: bool,
    pub sample_included: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item plus the owner of the cart it sits in.
#[derive(Debug, Clone)]
pub struct OwnedCartItemRecord {
    pub item: CartItemRecord,
    pub owner: CartOwner,
}

/// A cart item joined with live catalog data.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub item: CartItemRecord,
    pub product_name: String,
    pub brand_name: String,
    pub sku: String,
    pub current_price: Price,
    pub available_quantity: u64,
    pub availability_status: AvailabilityStatus,
    pub is_active: bool,
}
