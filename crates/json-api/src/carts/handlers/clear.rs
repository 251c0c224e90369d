//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Clear Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearCartResponse {
    /// Number of lines removed
    pub items_removed: u64,
}

/// Clear Cart Handler
///
/// Removes every line from the caller's cart. The cart itself is kept.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = []), ("session_id" = []))
)]
#[tracing::instrument(name = "cart.clear", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ClearCartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let items_removed = state
        .app
        .carts
        .clear(identity)
        .await
        .map_err(into_api_error)?;

    Ok(Json(ClearCartResponse { items_removed }))
}
