//! Orders Data

use sillage::prelude::OrderTotals;
use thiserror::Error;

use crate::domain::orders::records::Address;

/// Reasons a checkout request is rejected before anything is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("customer email is not a valid address")]
    InvalidEmail,

    #[error("country must be a two-letter code")]
    InvalidCountry,
}

/// Checkout request.
///
/// Tax and shipping are priced by the client, so every total component is
/// submitted and checked rather than computed here.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub shipping_address: Address,
    pub billing_address: Address,
    pub shipping_method: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub totals: OrderTotals,
    pub promotion_code: Option<String>,
    pub gift_card_code: Option<String>,
}

impl NewOrder {
    /// Check the fields that do not depend on stored data.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        validate_address(&self.shipping_address)?;
        validate_address(&self.billing_address)?;

        if self.shipping_method.trim().is_empty() {
            return Err(OrderValidationError::Missing("shipping_method"));
        }

        let email = self.customer_email.trim();

        if email.is_empty() {
            return Err(OrderValidationError::Missing("customer_email"));
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(OrderValidationError::InvalidEmail),
        }
    }
}

fn validate_address(address: &Address) -> Result<(), OrderValidationError> {
    for (field, value) in [
        ("name", &address.name),
        ("line1", &address.line1),
        ("city", &address.city),
        ("postal_code", &address.postal_code),
    ] {
        if value.trim().is_empty() {
            return Err(OrderValidationError::Missing(field));
        }
    }

    if address.country.len() != 2 || !address.country.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(OrderValidationError::InvalidCountry);
    }

    Ok(())
}
