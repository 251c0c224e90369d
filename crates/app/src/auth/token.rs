//! Bearer token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Bearer token prefix.
pub const USER_TOKEN_PREFIX: &str = "sl";

/// Number of random bytes encoded in a token.
pub const USER_TOKEN_SECRET_BYTES: usize = 32;

/// Generate a fresh raw bearer token.
#[must_use]
pub fn generate_user_token() -> String {
    let mut secret = [0_u8; USER_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    format!("{USER_TOKEN_PREFIX}_{}", encode_hex(&secret))
}

/// Hash a raw bearer token for storage and lookup.
#[must_use]
pub fn hash_user_token(token: &str) -> String {
    encode_hex(&Sha256::digest(token.as_bytes()))
}

/// Cheap shape check run before any lookup: `sl_` followed by lowercase hex.
#[must_use]
pub fn is_well_formed_user_token(token: &str) -> bool {
    token
        .strip_prefix(USER_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|secret| {
            secret.len() == USER_TOKEN_SECRET_BYTES * 2
                && secret.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        })
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}
