//! Product Handlers

pub(crate) mod sizes;
