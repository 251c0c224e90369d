//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;
use sillage_app::domain::{identity::Identity, users::records::UserUuid};

use crate::errors::{ApiError, ErrorCode};

/// Helpers for reading request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The resolved shopper, user or guest.
    fn identity_or_401(&self) -> Result<&Identity, ApiError>;

    /// The signed-in user; guests are rejected.
    fn user_or_401(&self) -> Result<UserUuid, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&Identity, ApiError> {
        self.obtain::<Identity>().map_err(|_ignored| {
            ApiError::new(ErrorCode::AuthenticationRequired, "Authentication required")
        })
    }

    fn user_or_401(&self) -> Result<UserUuid, ApiError> {
        self.identity_or_401()?.user().ok_or_else(|| {
            ApiError::new(ErrorCode::AuthenticationRequired, "Sign in to continue")
        })
    }
}
