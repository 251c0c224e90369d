//! Shopper identity resolution.

pub(crate) mod middleware;
