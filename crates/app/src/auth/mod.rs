//! Bearer-token authentication for signed-in shoppers.
//!
//! Tokens are issued by the admin CLI and only their SHA-256 hash is stored.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::AuthServiceError;
pub use models::*;
pub use service::{AuthService, MockAuthService, PgAuthService};
pub use token::{USER_TOKEN_PREFIX, generate_user_token, hash_user_token, is_well_formed_user_token};
